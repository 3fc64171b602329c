//! Gzip extraction and log file opening

use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::source::{SourceError, SourceResult};

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Where [`extract_gzip`] writes an archive's content
///
/// `X.gz` extracts to `X` beside it; any other name gets a `.log` suffix.
pub fn extracted_path(archive: &Path) -> PathBuf {
    if is_gzip(archive) {
        archive.with_extension("")
    } else {
        let mut name = archive.as_os_str().to_owned();
        name.push(".log");
        PathBuf::from(name)
    }
}

/// Decompress a gzip archive next to itself and return the extracted path
///
/// A partially written file is removed when decompression fails.
pub fn extract_gzip(archive: &Path) -> SourceResult<PathBuf> {
    let target = extracted_path(archive);
    info!(
        "Extracting {} to {}",
        archive.display(),
        target.display()
    );

    let input = File::open(archive)
        .map_err(|e| SourceError::io(format!("Failed to open {}", archive.display()), e))?;

    let result = File::create(&target).and_then(|output| {
        let mut decoder = MultiGzDecoder::new(BufReader::new(input));
        let mut writer = BufWriter::new(output);
        io::copy(&mut decoder, &mut writer)?;
        writer.flush()
    });

    if let Err(e) = result {
        let _ = fs::remove_file(&target);
        return Err(SourceError::io(
            format!("Failed to extract {}", archive.display()),
            e,
        ));
    }

    Ok(target)
}

/// Open a log for line reading
///
/// `.gz` files are decompressed on the fly, anything else is read as is.
pub fn open_log(path: &Path) -> SourceResult<Box<dyn BufRead + Send>> {
    let file = File::open(path)
        .map_err(|e| SourceError::io(format!("Failed to open {}", path.display()), e))?;

    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(
            BufReader::new(file),
        ))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open a fetched archive for reading
///
/// With `extract` set the archive is first decompressed next to itself and
/// the extracted file is read; otherwise the archive is streamed in place.
pub fn prepare_log(archive: &Path, extract: bool) -> SourceResult<Box<dyn BufRead + Send>> {
    let path = if extract {
        extract_gzip(archive)?
    } else {
        archive.to_path_buf()
    };
    open_log(&path)
}
