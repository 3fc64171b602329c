use std::io::{self, BufRead};

/// Line iterator over ISO-8859-1 encoded input
///
/// Every byte maps to the code point of the same value, so decoding never
/// fails. Lines are split on `\n` with a trailing `\r` removed.
pub struct Latin1Lines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Latin1Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> Iterator for Latin1Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();

        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(self.buf.iter().map(|&b| char::from(b)).collect()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
