//! Topic aggregation

use super::{distinct_in_order, rank_by_occurrence, RecordTopics, SourceData};
use crate::snapshot::Topic;
use ivq_common::slug::{mean_round1, topic_slug};
use ivq_common::{CatalogConfig, DifficultyBreakdown, QuestionRecord};
use std::collections::{HashMap, HashSet};

/// Related topics kept per topic
pub const RELATED_TOPICS: usize = 5;

/// Summarize each canonical topic that at least one record lists
///
/// Membership is case-insensitive. Result is ordered by question count descending.
pub(crate) fn aggregate(data: &SourceData, record_topics: &RecordTopics, config: &CatalogConfig) -> Vec<Topic> {
    let mut seen_slugs = HashSet::new();
    let mut topics = Vec::new();
    let mut canonical_names: HashMap<String, &str> = HashMap::new();
    for name in &data.topics {
        canonical_names.entry(name.to_lowercase()).or_insert(name.as_str());
    }

    for name in distinct_in_order(data.topics.iter().map(String::as_str)) {
        let slug = topic_slug(&name);
        if !seen_slugs.insert(slug.clone()) {
            continue;
        }

        let positions = record_topics.records_for(&name);
        if positions.is_empty() {
            continue;
        }

        let records: Vec<&QuestionRecord> = positions.iter().map(|&i| &data.records[i]).collect();
        let related_topics = co_occurring(&records, &name, &canonical_names);

        topics.push(Topic {
            question_count: records.len(),
            difficulty: DifficultyBreakdown::tally(records.iter().map(|r| r.difficulty)),
            top_companies: rank_by_occurrence(
                records.iter().map(|r| r.company.as_str()),
                config.topic_top_companies,
            ),
            avg_acceptance_rate: mean_round1(records.iter().map(|r| r.acceptance_rate)),
            description: config.topic_description(&slug, &name),
            related_topics,
            slug,
            name,
        });
    }

    topics.sort_by(|a, b| b.question_count.cmp(&a.question_count));
    topics
}

/// Topics most often listed alongside `name`, case-insensitively
///
/// Counted once per record. Named by canonical spelling, else the first spelling seen.
fn co_occurring(records: &[&QuestionRecord], name: &str, canonical_names: &HashMap<String, &str>) -> Vec<String> {
    let target = name.to_lowercase();
    let mut spellings: HashMap<String, &str> = HashMap::new();
    let mut lowered = Vec::new();

    for record in records {
        let mut seen = HashSet::new();
        for topic in &record.topics {
            let topic_lower = topic.to_lowercase();
            if topic_lower == target || !seen.insert(topic_lower.clone()) {
                continue;
            }
            spellings.entry(topic_lower.clone()).or_insert(topic.as_str());
            lowered.push(topic_lower);
        }
    }

    rank_by_occurrence(lowered.iter().map(String::as_str), RELATED_TOPICS)
        .into_iter()
        .map(|topic_lower| {
            canonical_names
                .get(&topic_lower)
                .or_else(|| spellings.get(&topic_lower))
                .map(|spelling| spelling.to_string())
                .unwrap_or(topic_lower)
        })
        .collect()
}
