//! Aggregation Engine
//!
//! Builds every derived view from one raw record table:
//! - Per-company summaries
//! - Per-topic summaries
//! - Deduplicated unique questions
//! - Company ↔ topic cross-reference index
//! - Per-company / per-topic question listings
//!
//! # Ordering
//! Outputs never depend on hash-map iteration order. Grouping uses insertion-ordered
//! `Vec`s with `HashMap<String, usize>` position indexes, and all rankings use the
//! stable `sort_by`, so ties keep first-encounter order.
//!
//! # Failure
//! Validation runs before any aggregation. One bad record aborts the build.

mod companies;
mod cross_ref;
mod listings;
mod questions;
mod topics;
pub mod validate;

use crate::snapshot::{BuildStats, Snapshot};
use ivq_common::{time, CatalogConfig, QuestionRecord, Result};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info};

/// Everything the raw data collaborator supplies for one build
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub records: Vec<QuestionRecord>,
    /// Company slugs to aggregate
    pub companies: Vec<String>,
    /// Canonical topic names
    pub topics: Vec<String>,
}

impl SourceData {
    /// Source data whose company and topic lists are derived from the records
    /// themselves, in first-seen order
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let companies = distinct_in_order(records.iter().map(|r| r.company.as_str()));
        let topics = distinct_in_order(
            records
                .iter()
                .flat_map(|r| r.topics.iter().map(String::as_str)),
        );
        Self {
            records,
            companies,
            topics,
        }
    }
}

/// Build a snapshot from raw records
///
/// Deterministic for a given input apart from the build timestamp.
pub fn build(data: &SourceData, config: &CatalogConfig) -> Result<Snapshot> {
    let started = Instant::now();
    validate::validate_records(&data.records)?;

    let built_at = time::now();
    let record_topics = RecordTopics::index(&data.records);

    debug!(
        records = data.records.len(),
        companies = data.companies.len(),
        topics = data.topics.len(),
        "Starting aggregation"
    );

    let companies = companies::aggregate(data, config, built_at);
    let topics = topics::aggregate(data, &record_topics, config);
    let questions = questions::deduplicate(&data.records);
    let cross_refs = cross_ref::build_index(data, config);
    let company_questions = listings::by_company(&data.records, &companies);
    let topic_questions = listings::by_topic(&data.records, &record_topics, &topics);

    let company_index = position_index(companies.iter().map(|c| c.slug.as_str()));
    let topic_index = position_index(topics.iter().map(|t| t.slug.as_str()));
    let question_index = position_index(questions.iter().map(|q| q.slug.as_str()));

    let thin_content_threshold = config.thin_content_threshold;
    let publishable = cross_refs
        .ranked
        .iter()
        .filter(|r| r.question_count >= thin_content_threshold)
        .count();

    let stats = BuildStats {
        total_records: data.records.len(),
        unique_questions: questions.len(),
        companies: companies.len(),
        topics: topics.len(),
        cross_references: cross_refs.ranked.len(),
        publishable_cross_references: publishable,
        built_at,
        build_duration_ms: time::duration_to_millis(started.elapsed()),
    };

    info!(
        records = stats.total_records,
        unique_questions = stats.unique_questions,
        companies = stats.companies,
        topics = stats.topics,
        cross_references = stats.cross_references,
        publishable = stats.publishable_cross_references,
        duration_ms = stats.build_duration_ms,
        "Aggregation complete"
    );

    Ok(Snapshot {
        companies,
        company_index,
        topics,
        topic_index,
        questions,
        question_index,
        cross_refs,
        company_questions,
        topic_questions,
        thin_content_threshold,
        stats,
    })
}

/// Reverse index lowercased topic → record positions
///
/// A record listing the same topic twice (in any casing) appears once.
#[derive(Debug, Default)]
pub(crate) struct RecordTopics {
    records_by_topic: HashMap<String, Vec<usize>>,
}

impl RecordTopics {
    pub fn index(records: &[QuestionRecord]) -> Self {
        let mut records_by_topic: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            for topic in distinct_in_order(record.topics.iter().map(|t| t.to_lowercase())) {
                records_by_topic.entry(topic).or_default().push(i);
            }
        }

        Self { records_by_topic }
    }

    /// Record positions listing `topic` (case-insensitive), in input order
    pub fn records_for(&self, topic: &str) -> &[usize] {
        self.records_by_topic
            .get(&topic.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Count occurrences and return the `limit` most common, most common first
///
/// Ties keep first-encounter order.
pub(crate) fn rank_by_occurrence<'a, I>(items: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for item in items {
        match positions.get(item) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(item, _)| item.to_string())
        .collect()
}

/// Distinct values in first-seen order
pub(crate) fn distinct_in_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

fn position_index<'a, I>(slugs: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    slugs
        .into_iter()
        .enumerate()
        .map(|(i, slug)| (slug.to_string(), i))
        .collect()
}
