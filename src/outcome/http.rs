//! HTTP outcome source for the dashboard data API
//!
//! Issues `GET {base_url}/outcomes` with the query's lottery type,
//! strategy, period count and selectors as query parameters, and expects
//! a JSON array of `{period_id, is_hit}` records oldest first.

use super::{take_recent, OutcomeError, OutcomeQuery, OutcomeRecord, OutcomeSource};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Configuration for the HTTP outcome source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the data API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Outcome source backed by the data API
pub struct HttpOutcomeSource {
    config: HttpSourceConfig,
    client: Client,
}

impl HttpOutcomeSource {
    /// Create a new source
    pub fn new(config: HttpSourceConfig) -> Result<Self, OutcomeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Endpoint URL for outcome queries
    pub fn endpoint(&self) -> String {
        format!("{}/outcomes", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters sent for a request
    pub fn query_params(query: &OutcomeQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("lottery_type".to_string(), query.lottery_type.clone()),
            ("strategy".to_string(), query.strategy.clone()),
            ("periods".to_string(), query.test_periods.to_string()),
        ];
        params.extend(
            query
                .selectors
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }
}

#[async_trait]
impl OutcomeSource for HttpOutcomeSource {
    async fn fetch(&self, query: &OutcomeQuery) -> Result<Vec<OutcomeRecord>, OutcomeError> {
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            lottery_type = %query.lottery_type,
            strategy = %query.strategy,
            periods = query.test_periods,
            "Fetching outcomes from data API"
        );

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OutcomeError::Status { status, body });
        }

        let records: Vec<OutcomeRecord> = response.json().await?;

        tracing::info!(
            received = records.len(),
            strategy = %query.strategy,
            "Received outcome sequence"
        );

        // The API may return more history than asked for
        Ok(take_recent(records, query.test_periods))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
