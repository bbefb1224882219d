//! Question deduplication
//!
//! Collapses (question, company) records into one `UniqueQuestion` per slug.
//!
//! # Algorithm
//! 1. One pass over the records builds slug → company frequencies
//! 2. A second pass emits a question for each slug the first time it is seen,
//!    using that record as the representative
//! 3. Related questions: every other question scores +1 for equal difficulty
//!    and +2 per shared topic (case-insensitive); the top 5 positive scores win
//! 4. Final order: number of companies descending

use super::distinct_in_order;
use crate::snapshot::{CompanyFrequency, UniqueQuestion};
use ivq_common::QuestionRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Related questions kept per question
pub const RELATED_QUESTIONS: usize = 5;

pub(crate) fn deduplicate(records: &[QuestionRecord]) -> Vec<UniqueQuestion> {
    let mut company_frequencies: HashMap<&str, Vec<CompanyFrequency>> = HashMap::new();
    for record in records {
        company_frequencies
            .entry(record.slug.as_str())
            .or_default()
            .push(CompanyFrequency {
                company: record.company.clone(),
                frequency: record.frequency,
            });
    }

    let mut representatives: Vec<&QuestionRecord> = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for record in records {
        match first_seen.get(record.slug.as_str()) {
            Some(&pos) => {
                let representative = representatives[pos];
                if representative.difficulty != record.difficulty
                    || representative.topics != record.topics
                {
                    debug!(
                        slug = %record.slug,
                        company = %record.company,
                        "Record disagrees with representative; keeping first-seen values"
                    );
                }
            }
            None => {
                first_seen.insert(record.slug.as_str(), representatives.len());
                representatives.push(record);
            }
        }
    }

    let related = related_questions(&representatives);

    let mut questions: Vec<UniqueQuestion> = representatives
        .iter()
        .zip(related)
        .map(|(record, related_questions)| {
            let mut companies = company_frequencies
                .remove(record.slug.as_str())
                .unwrap_or_default();
            companies.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));

            UniqueQuestion {
                id: record.id.clone(),
                slug: record.slug.clone(),
                title: record.title.clone(),
                difficulty: record.difficulty,
                topics: record.topics.clone(),
                acceptance_rate: record.acceptance_rate,
                is_premium: record.is_premium,
                url: record.url.clone(),
                companies,
                related_questions,
            }
        })
        .collect();

    questions.sort_by(|a, b| b.companies.len().cmp(&a.companies.len()));
    questions
}

/// Related slugs for each representative, same order as the input
fn related_questions(representatives: &[&QuestionRecord]) -> Vec<Vec<String>> {
    let topic_sets: Vec<HashSet<String>> = representatives
        .iter()
        .map(|r| {
            distinct_in_order(r.topics.iter().map(|t| t.to_lowercase()))
                .into_iter()
                .collect()
        })
        .collect();

    representatives
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let mut scored: Vec<(usize, usize)> = representatives
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(j, candidate)| {
                    let mut score = 0;
                    if candidate.difficulty == current.difficulty {
                        score += 1;
                    }
                    score += 2 * topic_sets[i].intersection(&topic_sets[j]).count();
                    (score > 0).then_some((j, score))
                })
                .collect();

            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored
                .into_iter()
                .take(RELATED_QUESTIONS)
                .map(|(j, _)| representatives[j].slug.clone())
                .collect()
        })
        .collect()
}
