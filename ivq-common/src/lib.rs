//! # IVQ Common Library
//!
//! Shared code for the interview-question catalog crates:
//! - Raw record and derived data model types
//! - Error taxonomy
//! - Catalog configuration loading (TOML)
//! - Slug and display-name helpers
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod models;
pub mod slug;
pub mod time;

pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use models::{Difficulty, DifficultyBreakdown, QuestionRecord, Timeframe};
