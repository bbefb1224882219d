//! Derived catalog types and the immutable snapshot that owns them
//!
//! A `Snapshot` is produced wholesale by [`crate::engine::build`] and never
//! mutated afterwards. Every accessor is a read-only projection; lookups for
//! unknown slugs return `None` or an empty slice, never an error.

use chrono::{DateTime, Utc};
use ivq_common::{Difficulty, DifficultyBreakdown, QuestionRecord, Timeframe};
use serde::Serialize;
use std::collections::HashMap;

/// Per-company summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub slug: String,
    pub name: String,
    /// 1 = most prominent
    pub tier: u8,
    /// Total records for this company
    pub question_count: usize,
    /// Distinct question slugs
    pub unique_question_count: usize,
    pub difficulty: DifficultyBreakdown,
    /// Most frequent topic names, most common first
    pub top_topics: Vec<String>,
    pub avg_acceptance_rate: f64,
    pub avg_frequency: f64,
    pub last_updated: DateTime<Utc>,
}

/// Per-topic summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub slug: String,
    /// Canonical topic name
    pub name: String,
    pub question_count: usize,
    pub difficulty: DifficultyBreakdown,
    /// Company slugs with the most records under this topic
    pub top_companies: Vec<String>,
    pub avg_acceptance_rate: f64,
    pub description: String,
    /// Topic names that co-occur most often with this one
    pub related_topics: Vec<String>,
}

/// One company asking a question, with how often it asks it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyFrequency {
    pub company: String,
    pub frequency: f64,
}

/// A question collapsed across every company that asks it
///
/// Difficulty, topics and acceptance rate come from the first record seen for
/// the slug; all records of a slug are assumed to agree on them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueQuestion {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub acceptance_rate: f64,
    pub is_premium: bool,
    pub url: String,
    /// Sorted by frequency descending
    pub companies: Vec<CompanyFrequency>,
    /// Slugs of similar questions, best match first
    pub related_questions: Vec<String>,
}

/// Aggregate statistics for a (company, topic) intersection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyTopicCrossRef {
    pub company_slug: String,
    pub company_name: String,
    pub topic_slug: String,
    pub topic_name: String,
    pub question_count: usize,
    pub difficulty: DifficultyBreakdown,
}

/// A single record as listed on a company or topic page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionContext {
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub acceptance_rate: f64,
    pub company: String,
    pub frequency: f64,
    pub timeframe: Timeframe,
    pub is_premium: bool,
    pub url: String,
}

impl From<&QuestionRecord> for QuestionContext {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.title.clone(),
            difficulty: record.difficulty,
            topics: record.topics.clone(),
            acceptance_rate: record.acceptance_rate,
            company: record.company.clone(),
            frequency: record.frequency,
            timeframe: record.timeframe,
            is_premium: record.is_premium,
            url: record.url.clone(),
        }
    }
}

/// Summary counts for one build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildStats {
    pub total_records: usize,
    pub unique_questions: usize,
    pub companies: usize,
    pub topics: usize,
    pub cross_references: usize,
    pub publishable_cross_references: usize,
    pub built_at: DateTime<Utc>,
    pub build_duration_ms: u64,
}

/// Company ↔ topic cross-reference index plus question lookup maps
#[derive(Debug, Clone, Default)]
pub(crate) struct CrossRefIndex {
    /// All refs, count descending (ties in bucket creation order)
    pub ranked: Vec<CompanyTopicCrossRef>,
    pub by_company: HashMap<String, Vec<CompanyTopicCrossRef>>,
    pub by_topic: HashMap<String, Vec<CompanyTopicCrossRef>>,
    /// Question slug → company slugs, first-seen order
    pub question_companies: HashMap<String, Vec<String>>,
    /// Question slug → topic names of its representative record
    pub question_topics: HashMap<String, Vec<String>>,
}

/// Immutable result of one aggregation build
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub(crate) companies: Vec<Company>,
    pub(crate) company_index: HashMap<String, usize>,
    pub(crate) topics: Vec<Topic>,
    pub(crate) topic_index: HashMap<String, usize>,
    pub(crate) questions: Vec<UniqueQuestion>,
    pub(crate) question_index: HashMap<String, usize>,
    pub(crate) cross_refs: CrossRefIndex,
    pub(crate) company_questions: HashMap<String, Vec<QuestionContext>>,
    pub(crate) topic_questions: HashMap<String, Vec<QuestionContext>>,
    pub(crate) thin_content_threshold: usize,
    pub(crate) stats: BuildStats,
}

impl Snapshot {
    /// Companies ordered by tier, then question count descending
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company(&self, slug: &str) -> Option<&Company> {
        self.company_index.get(slug).map(|&i| &self.companies[i])
    }

    /// Topics ordered by question count descending
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        self.topic_index.get(slug).map(|&i| &self.topics[i])
    }

    /// Unique questions ordered by number of companies descending
    pub fn questions(&self) -> &[UniqueQuestion] {
        &self.questions
    }

    pub fn question_by_slug(&self, slug: &str) -> Option<&UniqueQuestion> {
        self.question_index.get(slug).map(|&i| &self.questions[i])
    }

    /// Records for a company, frequency descending
    pub fn questions_for_company(&self, slug: &str) -> &[QuestionContext] {
        self.company_questions
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records for a topic, frequency descending, one per question slug
    pub fn questions_for_topic(&self, slug: &str) -> &[QuestionContext] {
        self.topic_questions
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cross-references of a company, question count descending
    pub fn cross_refs_for_company(&self, slug: &str) -> &[CompanyTopicCrossRef] {
        self.cross_refs
            .by_company
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cross-references of a topic, question count descending
    pub fn cross_refs_for_topic(&self, slug: &str) -> &[CompanyTopicCrossRef] {
        self.cross_refs
            .by_topic
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn cross_ref(&self, company_slug: &str, topic_slug: &str) -> Option<&CompanyTopicCrossRef> {
        self.cross_refs_for_company(company_slug)
            .iter()
            .find(|r| r.topic_slug == topic_slug)
    }

    /// Company slugs asking a question, first-seen order
    pub fn companies_for_question(&self, slug: &str) -> &[String] {
        self.cross_refs
            .question_companies
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn topics_for_question(&self, slug: &str) -> &[String] {
        self.cross_refs
            .question_topics
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unique questions of one difficulty, in popularity order
    pub fn questions_by_difficulty(&self, level: Difficulty) -> Vec<&UniqueQuestion> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == level)
            .collect()
    }

    /// Largest cross-references overall
    pub fn top_cross_references(&self, limit: usize) -> Vec<&CompanyTopicCrossRef> {
        self.cross_refs.ranked.iter().take(limit).collect()
    }

    /// Cross-references with enough records to be published
    pub fn publishable_cross_references(&self) -> Vec<&CompanyTopicCrossRef> {
        self.cross_refs
            .ranked
            .iter()
            .filter(|r| self.is_publishable(r))
            .collect()
    }

    pub fn is_publishable(&self, cross_ref: &CompanyTopicCrossRef) -> bool {
        cross_ref.question_count >= self.thin_content_threshold
    }

    pub fn thin_content_threshold(&self) -> usize {
        self.thin_content_threshold
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}
