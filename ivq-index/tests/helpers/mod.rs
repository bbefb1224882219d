//! Test Helper Utilities
//!
//! Shared fixtures for ivq-index integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use ivq_common::{CatalogConfig, Difficulty, Error, QuestionRecord, Result, Timeframe};
use ivq_index::{InMemorySource, QuestionSource, SourceData};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Build one raw record
pub fn record(
    company: &str,
    slug: &str,
    difficulty: Difficulty,
    topics: &[&str],
    frequency: f64,
    acceptance_rate: f64,
) -> QuestionRecord {
    QuestionRecord {
        id: format!("{}-{}", slug, company),
        slug: slug.to_string(),
        title: title_case(slug),
        difficulty,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        acceptance_rate,
        company: company.to_string(),
        frequency,
        timeframe: Timeframe::SixMonths,
        is_premium: false,
        url: format!("https://leetcode.com/problems/{}", slug),
    }
}

fn title_case(slug: &str) -> String {
    slug.split('-')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Ten records across three companies and six questions
///
/// | # | company | slug                | difficulty | freq |
/// |---|---------|---------------------|------------|------|
/// | 0 | google  | two-sum             | Easy       | 80   |
/// | 1 | amazon  | two-sum             | Easy       | 40   |
/// | 2 | google  | lru-cache           | Medium     | 70   |
/// | 3 | google  | merge-intervals     | Medium     | 60   |
/// | 4 | amazon  | merge-intervals     | Medium     | 65   |
/// | 5 | amazon  | number-of-islands   | Medium     | 90   |
/// | 6 | meta    | two-sum             | Easy       | 20   |
/// | 7 | meta    | trapping-rain-water | Hard       | 75   |
/// | 8 | google  | trapping-rain-water | Hard       | 50   |
/// | 9 | google  | word-ladder         | Hard       | 30   |
pub fn fixture_records() -> Vec<QuestionRecord> {
    use Difficulty::*;
    vec![
        record("google", "two-sum", Easy, &["Array", "Hash Table"], 80.0, 50.0),
        record("amazon", "two-sum", Easy, &["Array", "Hash Table"], 40.0, 50.0),
        record("google", "lru-cache", Medium, &["Hash Table", "Design", "Linked List"], 70.0, 40.0),
        record("google", "merge-intervals", Medium, &["Array", "Sorting"], 60.0, 45.0),
        record("amazon", "merge-intervals", Medium, &["Array", "Sorting"], 65.0, 45.0),
        record("amazon", "number-of-islands", Medium, &["Array", "Depth-First Search", "Matrix"], 90.0, 55.0),
        record("meta", "two-sum", Easy, &["Array", "Hash Table"], 20.0, 50.0),
        record("meta", "trapping-rain-water", Hard, &["Array", "Two Pointers", "Dynamic Programming"], 75.0, 60.0),
        record("google", "trapping-rain-water", Hard, &["Array", "Two Pointers", "Dynamic Programming"], 50.0, 60.0),
        record("google", "word-ladder", Hard, &["Hash Table", "String", "Breadth-First Search"], 30.0, 35.0),
    ]
}

/// Canonical topics; "Graph" has no records
pub fn fixture_topics() -> Vec<String> {
    [
        "Array",
        "Hash Table",
        "Design",
        "Linked List",
        "Sorting",
        "Depth-First Search",
        "Matrix",
        "Two Pointers",
        "Dynamic Programming",
        "String",
        "Breadth-First Search",
        "Graph",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

/// Companies to aggregate; "apple" has no records
pub fn fixture_companies() -> Vec<String> {
    ["google", "amazon", "meta", "apple"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

pub fn fixture_data() -> SourceData {
    SourceData {
        records: fixture_records(),
        companies: fixture_companies(),
        topics: fixture_topics(),
    }
}

pub fn fixture_source() -> InMemorySource {
    InMemorySource::from(fixture_data())
}

/// amazon tier 1, google tier 2, meta unlisted (default tier 3)
pub fn fixture_config() -> CatalogConfig {
    let mut config = CatalogConfig::default();
    config.company_tiers.insert("amazon".to_string(), 1);
    config.company_tiers.insert("google".to_string(), 2);
    config
}

/// Source wrapper that counts loads, delays them, and can fail the first N
pub struct CountingSource {
    inner: InMemorySource,
    delay: Duration,
    failures_remaining: AtomicUsize,
    loads: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: InMemorySource, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            failures_remaining: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn failing_first(mut self, failures: usize) -> Self {
        self.failures_remaining = AtomicUsize::new(failures);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for CountingSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(Error::SourceUnavailable("upstream export offline".to_string()));
        }

        self.inner.load_questions().await
    }

    async fn list_companies(&self) -> Result<Vec<String>> {
        self.inner.list_companies().await
    }

    async fn list_topics(&self) -> Result<Vec<String>> {
        self.inner.list_topics().await
    }
}
