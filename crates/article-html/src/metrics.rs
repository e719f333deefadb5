//! Derived metrics: visible text, word count, reading time, title and
//! meta description.

use article_html_core::{reading_minutes, truncate_summary, SummaryLimits};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("TAG_RE: hardcoded regex is valid"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RE: hardcoded regex is valid"));

static META_COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--\s*(?i:meta description):\s*(.*?)\s*-->")
        .expect("META_COMMENT_RE: hardcoded regex is valid")
});

static FIRST_PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<p\b[^>]*>(.*?)</p>").expect("FIRST_PARAGRAPH_RE: hardcoded regex is valid")
});

static FIRST_H1_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<h1\b[^>]*>(.*?)</h1>").expect("FIRST_H1_RE: hardcoded regex is valid")
});

/// Visible text of an HTML fragment: tags become spaces, whitespace collapses.
pub fn extract_text(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

pub fn word_count(html: &str) -> usize {
    extract_text(html).split_whitespace().count()
}

pub fn reading_time(html: &str, words_per_minute: usize) -> usize {
    reading_minutes(word_count(html), words_per_minute)
}

/// The explicit `<!-- Meta Description: ... -->` comment if present, otherwise
/// a summary of the first paragraph.
pub fn meta_description(html: &str, limits: &SummaryLimits) -> String {
    if let Some(caps) = META_COMMENT_RE.captures(html) {
        return caps[1].trim().to_string();
    }

    FIRST_PARAGRAPH_RE
        .captures(html)
        .map(|caps| truncate_summary(&extract_text(&caps[1]), limits))
        .unwrap_or_default()
}

pub fn title(html: &str) -> String {
    FIRST_H1_RE
        .captures(html)
        .map(|caps| extract_text(&caps[1]))
        .unwrap_or_default()
}
