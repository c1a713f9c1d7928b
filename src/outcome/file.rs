//! File-backed outcome source
//!
//! Reads outcome sequences exported from the dashboard, either as CSV
//! (`period_id,is_hit`) or as a JSON array of records.

use super::{parse_hit_flag, take_recent, OutcomeError, OutcomeQuery, OutcomeRecord, OutcomeSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Outcome source reading a local export file
#[derive(Debug, Clone)]
pub struct FileOutcomeSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    period_id: String,
    is_hit: String,
}

impl FileOutcomeSource {
    /// Create a source for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV content with a `period_id,is_hit` header
    pub fn parse_csv(content: &str) -> Result<Vec<OutcomeRecord>, OutcomeError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            // Header occupies line 1
            let line = i + 2;
            let row = row?;
            if row.period_id.is_empty() {
                return Err(OutcomeError::InvalidRecord {
                    line,
                    reason: "empty period_id".to_string(),
                });
            }
            let is_hit = parse_hit_flag(&row.is_hit).ok_or_else(|| OutcomeError::InvalidRecord {
                line,
                reason: format!("unrecognised hit flag {:?}", row.is_hit),
            })?;
            records.push(OutcomeRecord::new(row.period_id, is_hit));
        }

        Ok(records)
    }

    /// Parse a JSON array of outcome records
    pub fn parse_json(content: &str) -> Result<Vec<OutcomeRecord>, OutcomeError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[async_trait]
impl OutcomeSource for FileOutcomeSource {
    async fn fetch(&self, query: &OutcomeQuery) -> Result<Vec<OutcomeRecord>, OutcomeError> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = match extension.as_str() {
            "csv" => Self::parse_csv(&content)?,
            "json" => Self::parse_json(&content)?,
            other => return Err(OutcomeError::UnsupportedFormat(other.to_string())),
        };

        let total = records.len();
        let records = take_recent(records, query.test_periods);

        tracing::debug!(
            path = %self.path.display(),
            total,
            kept = records.len(),
            lottery_type = %query.lottery_type,
            strategy = %query.strategy,
            "Loaded outcome file"
        );

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_csv() {
        let csv = "period_id,is_hit\n2024001,0\n2024002, miss\n2024003,HIT\n";
        let records = FileOutcomeSource::parse_csv(csv).unwrap();
        assert_eq!(
            records,
            vec![
                OutcomeRecord::miss("2024001"),
                OutcomeRecord::miss("2024002"),
                OutcomeRecord::hit("2024003"),
            ]
        );
    }

    #[test]
    fn test_parse_csv_bad_flag_reports_line() {
        let csv = "period_id,is_hit\n2024001,0\n2024002,perhaps\n";
        let err = FileOutcomeSource::parse_csv(csv).unwrap_err();
        assert!(matches!(err, OutcomeError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_parse_csv_empty_period() {
        let csv = "period_id,is_hit\n,1\n";
        let err = FileOutcomeSource::parse_csv(csv).unwrap_err();
        assert!(matches!(err, OutcomeError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[{"period_id": 1, "is_hit": false}, {"period_id": "2", "is_hit": true}]"#;
        let records = FileOutcomeSource::parse_json(json).unwrap();
        assert_eq!(records, vec![OutcomeRecord::miss("1"), OutcomeRecord::hit("2")]);
    }

    #[tokio::test]
    async fn test_fetch_csv_keeps_recent_periods() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "period_id,is_hit").unwrap();
        for i in 1..=6 {
            writeln!(file, "{},{}", i, i % 3 == 0).unwrap();
        }

        let source = FileOutcomeSource::new(file.path());
        let query = OutcomeQuery::new("pl3", "cold-number", 4);
        let records = source.fetch(&query).await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].period_id, "3");
        assert!(records[0].is_hit);
        assert_eq!(records[3].period_id, "6");
    }

    #[test]
    fn test_fetch_json_on_current_thread_runtime() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"period_id": "a", "is_hit": true}}]"#).unwrap();

        let source = FileOutcomeSource::new(file.path());
        let query = OutcomeQuery::new("ssq", "hot-number", 10);
        let records = tokio_test::block_on(source.fetch(&query)).unwrap();
        assert_eq!(records, vec![OutcomeRecord::hit("a")]);
    }

    #[tokio::test]
    async fn test_fetch_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let source = FileOutcomeSource::new(file.path());
        let query = OutcomeQuery::new("pl3", "cold-number", 4);

        let err = source.fetch(&query).await.unwrap_err();
        assert!(matches!(err, OutcomeError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let source = FileOutcomeSource::new("/nonexistent/outcomes.csv");
        let query = OutcomeQuery::new("pl3", "cold-number", 4);
        assert!(matches!(
            source.fetch(&query).await,
            Err(OutcomeError::Io(_))
        ));
    }
}
