//! Company ↔ topic cross-reference index

use super::SourceData;
use crate::snapshot::{CompanyTopicCrossRef, CrossRefIndex};
use ivq_common::slug::{company_display_name, topic_slug};
use ivq_common::{CatalogConfig, DifficultyBreakdown};
use std::collections::{HashMap, HashSet};

struct Bucket {
    company: String,
    topic_slug: String,
    topic_name: String,
    difficulty: DifficultyBreakdown,
}

/// Accumulate every (record, topic) pair into a `company:topic_slug` bucket
///
/// Spellings sharing a slug ("Hash Table", "hash-table") share a bucket, and a
/// topic listed twice on one record counts once.
pub(crate) fn build_index(data: &SourceData, config: &CatalogConfig) -> CrossRefIndex {
    let mut canonical_names: HashMap<String, &str> = HashMap::new();
    for name in &data.topics {
        canonical_names.entry(topic_slug(name)).or_insert(name.as_str());
    }

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut question_companies: HashMap<String, Vec<String>> = HashMap::new();
    let mut question_topics: HashMap<String, Vec<String>> = HashMap::new();

    for record in &data.records {
        let companies = question_companies.entry(record.slug.clone()).or_default();
        if !companies.contains(&record.company) {
            companies.push(record.company.clone());
        }
        question_topics
            .entry(record.slug.clone())
            .or_insert_with(|| record.topics.clone());

        let mut seen = HashSet::new();
        for topic in &record.topics {
            let slug = topic_slug(topic);
            if !seen.insert(slug.clone()) {
                continue;
            }

            let key = format!("{}:{}", record.company, slug);
            let pos = match bucket_index.get(&key) {
                Some(&pos) => pos,
                None => {
                    let topic_name = canonical_names
                        .get(&slug)
                        .map(|name| name.to_string())
                        .unwrap_or_else(|| topic.clone());
                    bucket_index.insert(key, buckets.len());
                    buckets.push(Bucket {
                        company: record.company.clone(),
                        topic_slug: slug,
                        topic_name,
                        difficulty: DifficultyBreakdown::default(),
                    });
                    buckets.len() - 1
                }
            };
            buckets[pos].difficulty.record(record.difficulty);
        }
    }

    let refs: Vec<CompanyTopicCrossRef> = buckets
        .into_iter()
        .map(|bucket| CompanyTopicCrossRef {
            company_name: company_display_name(&bucket.company, &config.company_names),
            company_slug: bucket.company,
            topic_slug: bucket.topic_slug,
            topic_name: bucket.topic_name,
            question_count: bucket.difficulty.total(),
            difficulty: bucket.difficulty,
        })
        .collect();

    let mut by_company: HashMap<String, Vec<CompanyTopicCrossRef>> = HashMap::new();
    let mut by_topic: HashMap<String, Vec<CompanyTopicCrossRef>> = HashMap::new();
    for cross_ref in &refs {
        by_company
            .entry(cross_ref.company_slug.clone())
            .or_default()
            .push(cross_ref.clone());
        by_topic
            .entry(cross_ref.topic_slug.clone())
            .or_default()
            .push(cross_ref.clone());
    }
    for list in by_company.values_mut().chain(by_topic.values_mut()) {
        sort_by_count(list);
    }

    let mut ranked = refs;
    sort_by_count(&mut ranked);

    CrossRefIndex {
        ranked,
        by_company,
        by_topic,
        question_companies,
        question_topics,
    }
}

fn sort_by_count(refs: &mut [CompanyTopicCrossRef]) {
    refs.sort_by(|a, b| b.question_count.cmp(&a.question_count));
}
