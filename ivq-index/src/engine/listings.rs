//! Per-company and per-topic question listings

use super::RecordTopics;
use crate::snapshot::{Company, QuestionContext, Topic};
use ivq_common::QuestionRecord;
use std::collections::{HashMap, HashSet};

/// Company slug → its records, frequency descending
pub(crate) fn by_company(
    records: &[QuestionRecord],
    companies: &[Company],
) -> HashMap<String, Vec<QuestionContext>> {
    let mut listings: HashMap<String, Vec<QuestionContext>> = companies
        .iter()
        .map(|c| (c.slug.clone(), Vec::new()))
        .collect();

    for record in records {
        if let Some(list) = listings.get_mut(&record.company) {
            list.push(QuestionContext::from(record));
        }
    }

    for list in listings.values_mut() {
        sort_by_frequency(list);
    }
    listings
}

/// Topic slug → its records, frequency descending, one entry per question slug
///
/// A question asked by several companies keeps its highest-frequency record;
/// among equal frequencies the earliest record wins.
pub(crate) fn by_topic(
    records: &[QuestionRecord],
    record_topics: &RecordTopics,
    topics: &[Topic],
) -> HashMap<String, Vec<QuestionContext>> {
    topics
        .iter()
        .map(|topic| {
            let mut list: Vec<QuestionContext> = record_topics
                .records_for(&topic.name)
                .iter()
                .map(|&i| QuestionContext::from(&records[i]))
                .collect();
            sort_by_frequency(&mut list);

            let mut seen = HashSet::new();
            list.retain(|q| seen.insert(q.slug.clone()));

            (topic.slug.clone(), list)
        })
        .collect()
}

fn sort_by_frequency(list: &mut [QuestionContext]) {
    list.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
}
