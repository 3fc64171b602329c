//! Per-day top-N analytics over parsed access log records
//!
//! Records flow through [`bucket`] into a [`DayCounter`], and the counts
//! are ranked per day by [`rank`]. [`AggregationPipeline`] drives the
//! whole pass for one dimension.

pub mod bucket;
pub mod counter;
pub mod models;
pub mod pipeline;
pub mod ranker;

pub use bucket::bucket;
pub use counter::DayCounter;
pub use models::{CountEntry, DayRanking, RankedEntry, RankedResult};
pub use pipeline::{AggregationPipeline, PipelineError, PipelineStats};
pub use ranker::rank;
