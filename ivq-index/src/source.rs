//! Raw data source
//!
//! The aggregation engine consumes complete snapshots from a `QuestionSource`;
//! there is no streaming contract. Two implementations are provided:
//! - `InMemorySource`: fixtures and composition roots that already hold records
//! - `JsonFileSource`: a JSON export on disk, parsed once and reused
//!
//! # Export format
//! Either a bare array of records, or an object:
//! ```json
//! { "questions": [ ... ], "companies": ["google"], "topics": ["Array"] }
//! ```
//! When `companies`/`topics` are omitted they are derived from the records in
//! first-seen order.

use crate::engine::SourceData;
use async_trait::async_trait;
use ivq_common::{Error, QuestionRecord, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Supplier of raw interview-question data
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// All (question, company) records, in source order
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>>;

    /// Company slugs to aggregate
    async fn list_companies(&self) -> Result<Vec<String>>;

    /// Canonical topic names
    async fn list_topics(&self) -> Result<Vec<String>>;
}

/// Fetch everything one build needs from a source
pub async fn fetch_source_data(source: &dyn QuestionSource) -> Result<SourceData> {
    let (records, companies, topics) = tokio::try_join!(
        source.load_questions(),
        source.list_companies(),
        source.list_topics(),
    )?;

    debug!(
        records = records.len(),
        companies = companies.len(),
        topics = topics.len(),
        "Fetched source data"
    );

    Ok(SourceData {
        records,
        companies,
        topics,
    })
}

/// Source backed by records already in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: SourceData,
}

impl InMemorySource {
    /// Company and topic lists are derived from the records
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self {
            data: SourceData::from_records(records),
        }
    }

    /// Replace the derived company list
    pub fn with_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.companies = companies.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the derived canonical topic list
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.topics = topics.into_iter().map(Into::into).collect();
        self
    }
}

impl From<SourceData> for InMemorySource {
    fn from(data: SourceData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>> {
        Ok(self.data.records.clone())
    }

    async fn list_companies(&self) -> Result<Vec<String>> {
        Ok(self.data.companies.clone())
    }

    async fn list_topics(&self) -> Result<Vec<String>> {
        Ok(self.data.topics.clone())
    }
}

/// Source backed by a JSON export file
///
/// The file is read and parsed on first use; later calls reuse the result.
/// A failed read is not cached, so a later call retries.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    parsed: OnceCell<SourceData>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            parsed: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn data(&self) -> Result<&SourceData> {
        self.parsed.get_or_try_init(|| self.read_export()).await
    }

    async fn read_export(&self) -> Result<SourceData> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::SourceUnavailable(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let data = parse_export(&content)?;
        info!(
            path = %self.path.display(),
            records = data.records.len(),
            "Loaded question export"
        );
        Ok(data)
    }
}

#[async_trait]
impl QuestionSource for JsonFileSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>> {
        Ok(self.data().await?.records.clone())
    }

    async fn list_companies(&self) -> Result<Vec<String>> {
        Ok(self.data().await?.companies.clone())
    }

    async fn list_topics(&self) -> Result<Vec<String>> {
        Ok(self.data().await?.topics.clone())
    }
}

/// Parse a JSON export
///
/// Each record is decoded separately so a bad record is reported by position.
pub fn parse_export(content: &str) -> Result<SourceData> {
    let root: Value = serde_json::from_str(content)?;

    let (raw_records, companies, topics) = match root {
        Value::Array(items) => (items, None, None),
        Value::Object(mut map) => {
            let records = match map.remove("questions") {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(Error::SourceUnavailable(
                        "'questions' must be an array".to_string(),
                    ))
                }
                None => {
                    return Err(Error::SourceUnavailable(
                        "export has no 'questions' array".to_string(),
                    ))
                }
            };
            let companies = string_list(map.remove("companies"), "companies")?;
            let topics = string_list(map.remove("topics"), "topics")?;
            (records, companies, topics)
        }
        _ => {
            return Err(Error::SourceUnavailable(
                "export must be an array or an object".to_string(),
            ))
        }
    };

    let records = raw_records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<QuestionRecord>(value)
                .map_err(|e| Error::validation(index, e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut data = SourceData::from_records(records);
    if let Some(companies) = companies {
        data.companies = companies;
    }
    if let Some(topics) = topics {
        data.topics = topics;
    }
    Ok(data)
}

fn string_list(value: Option<Value>, field: &str) -> Result<Option<Vec<String>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::SourceUnavailable(format!("invalid '{}' list: {}", field, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": "1", "slug": "two-sum", "title": "Two Sum", "difficulty": "Easy",
        "topics": ["Array", "Hash Table"], "acceptanceRate": 49.1, "company": "google",
        "frequency": 80.0, "timeframe": "all", "isPremium": false,
        "url": "https://leetcode.com/problems/two-sum"
    }"#;

    #[test]
    fn test_parse_bare_array_derives_lists() {
        let data = parse_export(&format!("[{}]", RECORD)).unwrap();
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.companies, vec!["google"]);
        assert_eq!(data.topics, vec!["Array", "Hash Table"]);
    }

    #[test]
    fn test_parse_object_with_explicit_lists() {
        let json = format!(
            r#"{{ "questions": [{}], "companies": ["google", "meta"], "topics": ["Array"] }}"#,
            RECORD
        );
        let data = parse_export(&json).unwrap();
        assert_eq!(data.companies, vec!["google", "meta"]);
        assert_eq!(data.topics, vec!["Array"]);
    }

    #[test]
    fn test_parse_reports_bad_record_index() {
        let bad = RECORD.replace("\"difficulty\": \"Easy\",", "");
        let json = format!("[{}, {}]", RECORD, bad);
        match parse_export(&json) {
            Err(Error::DataValidation { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("difficulty"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_questions_array() {
        assert!(matches!(
            parse_export(r#"{ "companies": [] }"#),
            Err(Error::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_export("not json"), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_in_memory_source_overrides() {
        let record: QuestionRecord = serde_json::from_str(RECORD).unwrap();
        let source = InMemorySource::new(vec![record])
            .with_companies(["google", "amazon"])
            .with_topics(["Array"]);

        let data = fetch_source_data(&source).await.unwrap();
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.companies, vec!["google", "amazon"]);
        assert_eq!(data.topics, vec!["Array"]);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file_is_unavailable() {
        let source = JsonFileSource::new("/nonexistent/ivq/export.json");
        let result = source.load_questions().await;
        assert!(matches!(result, Err(Error::SourceUnavailable(_))));
    }
}
