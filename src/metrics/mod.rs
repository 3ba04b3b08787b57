//! Per-request samples, run statistics, and summarization.
mod collector;
mod summary;
mod types;


pub use collector::{StatsAccumulator, setup_stats_collector};
pub use summary::{RunSummary, SizeSummary, summarize};
pub use types::{Sample, StatsSnapshot};
