pub mod record;

pub use record::{DayKey, Dimension, LogRecord};
