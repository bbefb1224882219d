//! Related-Content Recommender
//!
//! Scores and ranks entities related to a company, topic or question, for
//! internal linking. Pure functions over a built [`Snapshot`]; an entity never
//! links to itself and a target appears at most once.
//!
//! # Scoring
//! Company ↔ company:
//! - +10 per shared top-topic slug
//! - +5 same tier, +3 if the candidate's tier is better (numerically lower)
//! - +3 if question counts differ by < 50, +1 more if by < 100
//!
//! Topic ↔ topic: precomputed co-occurring topics first, then the most popular
//! topics as backfill.
//!
//! Question ↔ question: precomputed related questions first, then backfill
//! scored +5 per shared topic, +2 same difficulty, + min(company count, 5).
//!
//! [`link_table`] runs all three over a whole snapshot for the page generator.

use crate::snapshot::{Company, Snapshot, Topic, UniqueQuestion};
use ivq_common::slug::topic_slug;
use serde::Serialize;
use std::collections::HashSet;

/// Priority of links taken from a precomputed related list
pub const EXPLICIT_PRIORITY: u32 = 10;

/// Priority of popularity backfill links
pub const POPULAR_PRIORITY: u32 = 5;

/// Kind of entity a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Company,
    Topic,
    Question,
}

/// Lightweight link descriptor for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedLink {
    pub kind: LinkKind,
    /// Slug of the target entity
    pub target: String,
    pub display_text: String,
    pub detail_text: String,
    pub priority_weight: u32,
}

/// Related links of one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityLinks {
    pub slug: String,
    pub links: Vec<RelatedLink>,
}

/// Related links of every company, topic and question, in snapshot order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkTable {
    pub companies: Vec<EntityLinks>,
    pub topics: Vec<EntityLinks>,
    pub questions: Vec<EntityLinks>,
}

/// Compute related links for every entity, at most `limit` per entity
pub fn link_table(snapshot: &Snapshot, limit: usize) -> LinkTable {
    LinkTable {
        companies: snapshot
            .companies()
            .iter()
            .map(|company| EntityLinks {
                slug: company.slug.clone(),
                links: related_companies(company, snapshot, limit),
            })
            .collect(),
        topics: snapshot
            .topics()
            .iter()
            .map(|topic| EntityLinks {
                slug: topic.slug.clone(),
                links: related_topics(topic, snapshot, limit),
            })
            .collect(),
        questions: snapshot
            .questions()
            .iter()
            .map(|question| EntityLinks {
                slug: question.slug.clone(),
                links: related_problems(question, snapshot, limit),
            })
            .collect(),
    }
}

/// Companies most similar to `company`
pub fn related_companies(company: &Company, snapshot: &Snapshot, limit: usize) -> Vec<RelatedLink> {
    let current_topics: HashSet<String> = company.top_topics.iter().map(|t| topic_slug(t)).collect();

    let mut scored: Vec<(&Company, u32)> = snapshot
        .companies()
        .iter()
        .filter(|candidate| candidate.slug != company.slug)
        .filter_map(|candidate| {
            let score = company_score(company, &current_topics, candidate);
            (score > 0).then_some((candidate, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .map(|(candidate, score)| RelatedLink {
            kind: LinkKind::Company,
            target: candidate.slug.clone(),
            display_text: candidate.name.clone(),
            detail_text: format!("{} questions", candidate.question_count),
            priority_weight: score,
        })
        .collect()
}

fn company_score(current: &Company, current_topics: &HashSet<String>, candidate: &Company) -> u32 {
    let candidate_topics: HashSet<String> = candidate.top_topics.iter().map(|t| topic_slug(t)).collect();
    let overlap = current_topics.intersection(&candidate_topics).count() as u32;

    let mut score = 10 * overlap;
    if candidate.tier == current.tier {
        score += 5;
    }
    if candidate.tier < current.tier {
        score += 3;
    }

    let difference = current.question_count.abs_diff(candidate.question_count);
    if difference < 50 {
        score += 3;
    }
    if difference < 100 {
        score += 1;
    }
    score
}

/// Topics related to `topic`
pub fn related_topics(topic: &Topic, snapshot: &Snapshot, limit: usize) -> Vec<RelatedLink> {
    let mut links = Vec::new();
    let mut included: HashSet<&str> = HashSet::new();
    included.insert(topic.slug.as_str());

    for name in &topic.related_topics {
        if links.len() >= limit {
            return links;
        }
        if let Some(candidate) = snapshot.topic(&topic_slug(name)) {
            if included.insert(candidate.slug.as_str()) {
                links.push(topic_link(candidate, EXPLICIT_PRIORITY));
            }
        }
    }

    for candidate in snapshot.topics() {
        if links.len() >= limit {
            break;
        }
        if included.insert(candidate.slug.as_str()) {
            links.push(topic_link(candidate, POPULAR_PRIORITY));
        }
    }

    links
}

fn topic_link(topic: &Topic, priority_weight: u32) -> RelatedLink {
    RelatedLink {
        kind: LinkKind::Topic,
        target: topic.slug.clone(),
        display_text: topic.name.clone(),
        detail_text: format!("{} questions", topic.question_count),
        priority_weight,
    }
}

/// Questions related to `question`
pub fn related_problems(question: &UniqueQuestion, snapshot: &Snapshot, limit: usize) -> Vec<RelatedLink> {
    let mut links = Vec::new();
    let mut included: HashSet<&str> = HashSet::new();
    included.insert(question.slug.as_str());

    for slug in &question.related_questions {
        if links.len() >= limit {
            return links;
        }
        if let Some(candidate) = snapshot.question_by_slug(slug) {
            if included.insert(candidate.slug.as_str()) {
                links.push(question_link(candidate, EXPLICIT_PRIORITY));
            }
        }
    }

    let remaining = limit - links.len();
    if remaining == 0 {
        return links;
    }

    let current_topics: HashSet<String> = question.topics.iter().map(|t| t.to_lowercase()).collect();

    let mut scored: Vec<(&UniqueQuestion, u32)> = snapshot
        .questions()
        .iter()
        .filter(|candidate| !included.contains(candidate.slug.as_str()))
        .filter_map(|candidate| {
            let score = question_score(question, &current_topics, candidate);
            (score > 0).then_some((candidate, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    links.extend(
        scored
            .into_iter()
            .take(remaining)
            .map(|(candidate, score)| question_link(candidate, score)),
    );
    links
}

fn question_score(current: &UniqueQuestion, current_topics: &HashSet<String>, candidate: &UniqueQuestion) -> u32 {
    let shared = candidate
        .topics
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<HashSet<_>>()
        .intersection(current_topics)
        .count() as u32;

    let mut score = 5 * shared;
    if candidate.difficulty == current.difficulty {
        score += 2;
    }
    score + candidate.companies.len().min(5) as u32
}

fn question_link(question: &UniqueQuestion, priority_weight: u32) -> RelatedLink {
    let companies = question.companies.len();
    RelatedLink {
        kind: LinkKind::Question,
        target: question.slug.clone(),
        display_text: question.title.clone(),
        detail_text: format!(
            "{} · asked by {} {}",
            question.difficulty,
            companies,
            if companies == 1 { "company" } else { "companies" }
        ),
        priority_weight,
    }
}
