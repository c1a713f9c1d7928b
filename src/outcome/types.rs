//! Outcome types

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Ground-truth result of one draw period for a given analysis strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Draw period identifier, e.g. "2024001"
    #[serde(deserialize_with = "period_id_from_any")]
    pub period_id: String,
    /// Whether the strategy's pick hit in this period
    pub is_hit: bool,
}

impl OutcomeRecord {
    pub fn new(period_id: impl Into<String>, is_hit: bool) -> Self {
        Self {
            period_id: period_id.into(),
            is_hit,
        }
    }

    pub fn hit(period_id: impl Into<String>) -> Self {
        Self::new(period_id, true)
    }

    pub fn miss(period_id: impl Into<String>) -> Self {
        Self::new(period_id, false)
    }
}

/// Data APIs emit period ids as either numbers or strings
fn period_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PeriodId {
        Text(String),
        Number(u64),
    }

    Ok(match PeriodId::deserialize(deserializer)? {
        PeriodId::Text(s) => s,
        PeriodId::Number(n) => n.to_string(),
    })
}

/// Parse the textual hit flags found in exported CSV files
pub fn parse_hit_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "hit" | "y" | "yes" => Some(true),
        "false" | "0" | "miss" | "n" | "no" => Some(false),
        _ => None,
    }
}

/// What to ask an outcome source for
///
/// `selectors` are strategy-specific (number position, reference period,
/// ...) and only meaningful to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeQuery {
    /// Lottery identifier, e.g. "ssq" or "pl3"
    pub lottery_type: String,
    /// Analysis strategy identifier
    pub strategy: String,
    /// Number of most recent periods to return
    pub test_periods: u32,
    /// Strategy-specific selectors
    #[serde(default)]
    pub selectors: BTreeMap<String, String>,
}

impl OutcomeQuery {
    pub fn new(lottery_type: impl Into<String>, strategy: impl Into<String>, test_periods: u32) -> Self {
        Self {
            lottery_type: lottery_type.into(),
            strategy: strategy.into(),
            test_periods,
            selectors: BTreeMap::new(),
        }
    }

    /// Add a strategy selector
    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selectors.insert(key.into(), value.into());
        self
    }
}

/// Outcome source errors
#[derive(Debug, Error)]
pub enum OutcomeError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Transport or status failure from the data API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Data API answered with a non-success status
    #[error("Data API returned {status}: {body}")]
    Status { status: u16, body: String },
    /// A record could not be interpreted
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
    /// Unsupported file extension
    #[error("Unsupported outcome file format: {0}")]
    UnsupportedFormat(String),
}
