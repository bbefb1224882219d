//! Slug and display-name helpers

use std::collections::HashMap;

/// Topic slug: lowercase name with spaces replaced by hyphens
///
/// "Hash Table" → "hash-table", "Two Pointers" → "two-pointers"
pub fn topic_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Display name for a company slug
///
/// An exact override in `overrides` wins ("ibm" → "IBM"). Otherwise each
/// `-`/`_`/space separated word is capitalized ("goldman-sachs" → "Goldman Sachs").
pub fn company_display_name(slug: &str, overrides: &HashMap<String, String>) -> String {
    if let Some(name) = overrides.get(slug) {
        return name.clone();
    }

    slug.split(|c: char| c == '-' || c == '_' || c == ' ')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean rounded to one decimal; 0.0 for an empty input
pub fn mean_round1<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        round1(sum / count as f64)
    }
}
