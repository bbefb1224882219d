//! ivq-index library - interview question catalog aggregation
//!
//! Turns flat (company, question, topic, frequency) records into the derived
//! views a static site renders: company, topic and question summaries, the
//! company ↔ topic cross-reference index, per-entity listings and related-content
//! recommendations.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ivq_index::{SnapshotCache, JsonFileSource};
//!
//! let cache = SnapshotCache::new(
//!     Arc::new(JsonFileSource::new("questions.json")),
//!     Arc::new(ivq_common::CatalogConfig::default()),
//! );
//! let snapshot = cache.get_snapshot().await?;
//! for cross_ref in snapshot.publishable_cross_references() {
//!     println!("{} / {}", cross_ref.company_name, cross_ref.topic_name);
//! }
//! ```

pub mod cache;
pub mod engine;
pub mod recommend;
pub mod snapshot;
pub mod source;

pub use cache::SnapshotCache;
pub use engine::{build, SourceData};
pub use recommend::{
    link_table, related_companies, related_problems, related_topics, EntityLinks, LinkKind, LinkTable,
    RelatedLink,
};
pub use snapshot::{
    BuildStats, Company, CompanyFrequency, CompanyTopicCrossRef, QuestionContext, Snapshot, Topic,
    UniqueQuestion,
};
pub use source::{InMemorySource, JsonFileSource, QuestionSource};
