//! Integration tests for lotto-stake

mod invariants;
mod pipeline;
mod scenarios;

use lotto_stake::outcome::OutcomeRecord;

/// Build a sequence of `len` periods where the 1-based `hits` periods hit
pub fn outcomes(hits: &[usize], len: usize) -> Vec<OutcomeRecord> {
    (1..=len)
        .map(|i| OutcomeRecord::new(format!("2024{:03}", i), hits.contains(&i)))
        .collect()
}

/// Decode the low `len` bits of `mask` into a sequence (bit set = hit)
pub fn from_mask(mask: u32, len: usize) -> Vec<OutcomeRecord> {
    (0..len)
        .map(|i| OutcomeRecord::new(i.to_string(), mask & (1 << i) != 0))
        .collect()
}
