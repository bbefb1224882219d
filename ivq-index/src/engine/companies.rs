//! Company aggregation

use super::{distinct_in_order, rank_by_occurrence, SourceData};
use crate::snapshot::Company;
use chrono::{DateTime, Utc};
use ivq_common::slug::{company_display_name, mean_round1};
use ivq_common::{CatalogConfig, DifficultyBreakdown, QuestionRecord};
use std::collections::{HashMap, HashSet};

/// Summarize each listed company that has at least one record
///
/// Records are grouped by exact `company` match. Result is ordered by tier
/// ascending, then question count descending.
pub(crate) fn aggregate(data: &SourceData, config: &CatalogConfig, built_at: DateTime<Utc>) -> Vec<Company> {
    let mut groups: HashMap<&str, Vec<&QuestionRecord>> = HashMap::new();
    for record in &data.records {
        groups.entry(record.company.as_str()).or_default().push(record);
    }

    let mut companies: Vec<Company> = distinct_in_order(data.companies.iter().map(String::as_str))
        .into_iter()
        .filter_map(|slug| {
            let records = groups.get(slug.as_str())?;
            Some(summarize(slug, records, config, built_at))
        })
        .collect();

    companies.sort_by(|a, b| {
        a.tier
            .cmp(&b.tier)
            .then_with(|| b.question_count.cmp(&a.question_count))
    });
    companies
}

fn summarize(
    slug: String,
    records: &[&QuestionRecord],
    config: &CatalogConfig,
    built_at: DateTime<Utc>,
) -> Company {
    let unique_question_count = records
        .iter()
        .map(|r| r.slug.as_str())
        .collect::<HashSet<_>>()
        .len();

    let top_topics = rank_by_occurrence(
        records
            .iter()
            .flat_map(|r| r.topics.iter().map(String::as_str)),
        config.company_top_topics,
    );

    Company {
        name: company_display_name(&slug, &config.company_names),
        tier: config.tier_for(&slug),
        question_count: records.len(),
        unique_question_count,
        difficulty: DifficultyBreakdown::tally(records.iter().map(|r| r.difficulty)),
        top_topics,
        avg_acceptance_rate: mean_round1(records.iter().map(|r| r.acceptance_rate)),
        avg_frequency: mean_round1(records.iter().map(|r| r.frequency)),
        last_updated: built_at,
        slug,
    }
}
