//! Single pass aggregation over access log lines
//!
//! Each line is parsed, bucketed by day and folded into a [`DayCounter`];
//! once the input is exhausted the counts are ranked. Unparsable lines
//! are skipped and tallied in [`PipelineStats`], never fatal. Only a
//! failure to read the input aborts a run, and then no partial result
//! is returned.

use serde::Serialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, info};

use crate::analytics::bucket::bucket;
use crate::analytics::counter::DayCounter;
use crate::analytics::models::RankedResult;
use crate::analytics::ranker::rank;
use crate::models::Dimension;
use crate::parser::{parse_line, ParseError};
use crate::source::Latin1Lines;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input unavailable: {0}")]
    InputUnavailable(#[source] io::Error),
}

/// Line accounting for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub lines: u64,
    pub parsed: u64,
    pub malformed: u64,
    pub bad_timestamp: u64,
}

impl PipelineStats {
    pub fn skipped(&self) -> u64 {
        self.malformed + self.bad_timestamp
    }
}

/// Aggregation settings for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationPipeline {
    dimension: Dimension,
    n: usize,
}

impl AggregationPipeline {
    pub fn new(dimension: Dimension, n: usize) -> Self {
        Self { dimension, n }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Rank an in-memory sequence of lines
    pub fn run<I, S>(&self, lines: I) -> RankedResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_stats(lines).0
    }

    /// Rank an in-memory sequence of lines, also returning line accounting
    pub fn run_with_stats<I, S>(&self, lines: I) -> (RankedResult, PipelineStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = DayCounter::new();
        let mut stats = PipelineStats::default();

        for line in lines {
            self.fold_line(&mut counter, &mut stats, line.as_ref());
        }

        self.finish(counter, stats)
    }

    /// Rank the Latin-1 encoded lines of a reader
    ///
    /// A read error anywhere in the stream fails the whole run.
    pub fn run_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(RankedResult, PipelineStats), PipelineError> {
        let mut counter = DayCounter::new();
        let mut stats = PipelineStats::default();

        for line in Latin1Lines::new(reader) {
            let line = line.map_err(PipelineError::InputUnavailable)?;
            self.fold_line(&mut counter, &mut stats, &line);
        }

        Ok(self.finish(counter, stats))
    }

    fn fold_line(&self, counter: &mut DayCounter, stats: &mut PipelineStats, line: &str) {
        stats.lines += 1;

        match parse_line(line) {
            Ok(record) => {
                stats.parsed += 1;
                counter.increment(bucket(&record), record.value(self.dimension));
            }
            Err(e) => {
                match e {
                    ParseError::Malformed { .. } => stats.malformed += 1,
                    ParseError::BadTimestamp { .. } => stats.bad_timestamp += 1,
                }
                debug!("Skipping line {}: {}", stats.lines, e);
            }
        }
    }

    fn finish(&self, counter: DayCounter, stats: PipelineStats) -> (RankedResult, PipelineStats) {
        info!(
            "Parsed {} of {} lines ({} malformed, {} bad timestamps), {} distinct {} over {} days",
            stats.parsed,
            stats.lines,
            stats.malformed,
            stats.bad_timestamp,
            counter.len(),
            self.dimension,
            counter.days()
        );

        (rank(&counter, self.n), stats)
    }
}
