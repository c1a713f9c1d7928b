//! Outcome source module
//!
//! Supplies the ordered per-period hit/miss sequence a backtest replays.
//! Producing those sequences is the job of the analysis strategies behind
//! the data API; this crate only reads them.

mod file;
mod http;
mod types;

pub use file::FileOutcomeSource;
pub use http::{HttpOutcomeSource, HttpSourceConfig};
pub use types::{parse_hit_flag, OutcomeError, OutcomeQuery, OutcomeRecord};

use async_trait::async_trait;

/// Trait for outcome source implementations
#[async_trait]
pub trait OutcomeSource: Send + Sync {
    /// Fetch the outcome sequence for a query, oldest period first
    async fn fetch(&self, query: &OutcomeQuery) -> Result<Vec<OutcomeRecord>, OutcomeError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Keep only the most recent `test_periods` records
pub(crate) fn take_recent(mut records: Vec<OutcomeRecord>, test_periods: u32) -> Vec<OutcomeRecord> {
    let keep = test_periods as usize;
    if records.len() > keep {
        let excess = records.len() - keep;
        records.drain(..excess);
    }
    records
}
