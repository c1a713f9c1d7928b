//! Policy validation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a staking policy is rejected before any replay
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A required parameter was not supplied
    #[error("Missing policy parameter: {0}")]
    MissingField(&'static str),
    /// A parameter could not be parsed
    #[error("Invalid value for {field}: {value:?}")]
    Parse {
        field: &'static str,
        value: String,
    },
    /// Betting sequence has no multipliers
    #[error("Betting sequence is empty")]
    EmptySequence,
    /// A multiplier is zero or negative
    #[error("Multiplier at position {index} must be positive, got {value}")]
    InvalidMultiplier { index: usize, value: Decimal },
    /// Base stake is zero or negative
    #[error("Base amount must be positive, got {0}")]
    NonPositiveBaseAmount(Decimal),
    /// Payout odds below break-even
    #[error("Odds must be at least 1.0, got {0}")]
    OddsBelowOne(Decimal),
    /// Stop-loss depth of zero
    #[error("Stop-loss count must be at least 1")]
    ZeroStopLoss,
    /// Betting activation threshold of zero
    #[error("Start omission must be at least 1")]
    ZeroStartOmission,
    /// No periods requested
    #[error("Test periods must be at least 1")]
    ZeroTestPeriods,
    /// Too few periods requested to hold one omission window and a bet
    #[error("Test periods must be at least {required} for start omission {start_omission}, got {actual}")]
    TestPeriodsBelowMinimum {
        start_omission: u32,
        required: u32,
        actual: u32,
    },
}
