//! Record validation
//!
//! Difficulty and timeframe domains are enforced by their types; this pass
//! checks what the types cannot: empty required strings and numeric ranges.

use ivq_common::{Error, QuestionRecord, Result};

/// Validate every record; the first failure aborts
pub fn validate_records(records: &[QuestionRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        validate_record(index, record)?;
    }
    Ok(())
}

fn validate_record(index: usize, record: &QuestionRecord) -> Result<()> {
    require_non_empty(index, "slug", &record.slug)?;
    require_non_empty(index, "title", &record.title)?;
    require_non_empty(index, "company", &record.company)?;

    if record.topics.iter().any(|t| t.trim().is_empty()) {
        return Err(Error::validation(
            index,
            format!("empty topic name for '{}'", record.slug),
        ));
    }

    if !record.acceptance_rate.is_finite() || !(0.0..=100.0).contains(&record.acceptance_rate) {
        return Err(Error::validation(
            index,
            format!(
                "acceptance rate {} for '{}' outside [0, 100]",
                record.acceptance_rate, record.slug
            ),
        ));
    }

    if !record.frequency.is_finite() || record.frequency < 0.0 {
        return Err(Error::validation(
            index,
            format!(
                "frequency {} for '{}' must be a finite value >= 0",
                record.frequency, record.slug
            ),
        ));
    }

    Ok(())
}

fn require_non_empty(index: usize, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(index, format!("missing required field '{}'", field)));
    }
    Ok(())
}
