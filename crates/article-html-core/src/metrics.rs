//! Article metrics
//!
//! Value types and formulas for the numbers stored alongside each article.

use crate::options::SummaryLimits;

/// Metrics derived from a normalized article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleMetrics {
    /// Number of whitespace-separated words in the visible text
    pub word_count: usize,

    /// Estimated reading time in whole minutes, never less than 1
    pub reading_time: usize,

    /// Text of the first `<h1>`, or empty
    pub title: String,

    /// Explicit or paragraph-derived meta description, or empty
    pub meta_description: String,
}

/// Reading time in minutes: `max(1, ceil(word_count / words_per_minute))`.
///
/// A zero reading speed is treated as one word per minute.
pub fn reading_minutes(word_count: usize, words_per_minute: usize) -> usize {
    word_count.div_ceil(words_per_minute.max(1)).max(1)
}

/// Shorten plain text into a meta description.
///
/// Text at or under `min_chars` yields an empty summary. Longer text keeps its
/// first `truncate_at` characters and always gets the ellipsis appended.
pub fn truncate_summary(text: &str, limits: &SummaryLimits) -> String {
    if text.chars().count() <= limits.min_chars {
        return String::new();
    }

    let mut summary: String = text.chars().take(limits.truncate_at).collect();
    summary.push_str(&limits.ellipsis);
    summary
}
