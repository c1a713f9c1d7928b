//! Backtest error taxonomy and shared enums

use crate::policy::PolicyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a backtest run
///
/// A run either returns a complete ledger and summary or one of these;
/// partial ledgers are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BacktestError {
    /// Policy parameters violate an invariant
    #[error("Invalid staking policy: {0}")]
    Configuration(#[from] PolicyError),
    /// Outcome sequence is empty or too short to hold one omission window
    #[error("Insufficient outcome data: need at least {required} periods, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    /// A money or counter value left the representable range
    #[error("Arithmetic overflow at period {period_id}")]
    ArithmeticOverflow { period_id: String },
}

/// How a betting cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleClose {
    /// A bet hit
    Won,
    /// Stop-loss depth reached without a hit
    StopLoss,
}

impl CycleClose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleClose::Won => "won",
            CycleClose::StopLoss => "stop_loss",
        }
    }
}
