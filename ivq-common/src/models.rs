//! Raw record types and shared value types
//!
//! `QuestionRecord` is the shape supplied by the raw data collaborator: one row
//! per (question, company) pairing. The same question slug recurs once for every
//! company that asks it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Question difficulty level
///
/// Serialized exactly as `"Easy"`, `"Medium"`, `"Hard"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Window over which a company's question frequency was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    ThirtyDays,
    ThreeMonths,
    SixMonths,
    MoreThanSixMonths,
    All,
}

/// One (question, company) interview-question observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// Ordered topic names; not unique across records
    pub topics: Vec<String>,
    /// Percentage in [0, 100]
    pub acceptance_rate: f64,
    /// Company slug (e.g. "google")
    pub company: String,
    /// How often the company asks this question; >= 0
    pub frequency: f64,
    pub timeframe: Timeframe,
    pub is_premium: bool,
    pub url: String,
}

/// Counts of Easy/Medium/Hard records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyBreakdown {
    /// Count one record of the given difficulty
    pub fn record(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }

    /// Tally a sequence of difficulties
    pub fn tally<I>(difficulties: I) -> Self
    where
        I: IntoIterator<Item = Difficulty>,
    {
        let mut breakdown = Self::default();
        for difficulty in difficulties {
            breakdown.record(difficulty);
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}
