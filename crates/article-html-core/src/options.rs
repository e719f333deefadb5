//! Configuration options for article normalization

/// Longest meta description a paragraph-derived summary may produce.
pub const MAX_SUMMARY_CHARS: usize = 160;

/// Inline styles injected into tags that do not carry a `style` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDefaults {
    /// Style for `<table>`
    pub table: String,

    /// Style for `<th>`
    pub th: String,

    /// Style for `<td>`
    pub td: String,

    /// Style for `<blockquote>`
    pub blockquote: String,

    /// Style for `<pre>`
    pub pre: String,

    /// Declaration inserted before `background-color` in styled `<div>`s
    /// that have no margin
    pub div_margin: String,
}

impl StyleDefaults {
    /// Look up the default style for a tag name, if one is injected
    pub fn for_tag(&self, tag: &str) -> Option<&str> {
        match tag {
            "table" => Some(&self.table),
            "th" => Some(&self.th),
            "td" => Some(&self.td),
            "blockquote" => Some(&self.blockquote),
            "pre" => Some(&self.pre),
            _ => None,
        }
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            table: "width: 100%; border-collapse: collapse; margin: 20px 0; border: 1px solid #e5e7eb;"
                .to_string(),
            th: "border: 1px solid #dee2e6; padding: 12px; text-align: left; background-color: #f8f9fa; font-weight: 600;"
                .to_string(),
            td: "border: 1px solid #dee2e6; padding: 12px;".to_string(),
            blockquote: "border-left: 4px solid #3b82f6; padding: 16px 20px; margin: 20px 0; background-color: #f8fafc; font-style: italic; color: #334155;"
                .to_string(),
            pre: "background-color: #f8f9fa; padding: 16px; border-radius: 8px; overflow-x: auto; border: 1px solid #e5e7eb; margin: 20px 0;"
                .to_string(),
            div_margin: "margin: 24px 0;".to_string(),
        }
    }
}

/// Limits for summaries derived from the first paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLimits {
    /// Paragraphs with this many characters or fewer produce no summary
    pub min_chars: usize,

    /// Number of characters kept before the ellipsis
    pub truncate_at: usize,

    /// Suffix appended to every derived summary
    pub ellipsis: String,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            min_chars: 50,
            truncate_at: 157,
            ellipsis: "...".to_string(),
        }
    }
}

/// Options for the normalizer and its metric functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerOptions {
    /// Inline styles for tables, quotes, code blocks and callout divs
    pub styles: StyleDefaults,

    /// Reading speed used for the reading-time estimate
    pub words_per_minute: usize,

    /// Meta description limits
    pub summary: SummaryLimits,
}

impl SanitizerOptions {
    /// Check the options for values the metric functions cannot honour.
    pub fn validate(&self) -> Result<(), String> {
        if self.words_per_minute == 0 {
            return Err("words_per_minute must be greater than zero".to_string());
        }

        let longest = self.summary.truncate_at + self.summary.ellipsis.chars().count();
        if longest > MAX_SUMMARY_CHARS {
            return Err(format!(
                "summary of {} characters exceeds the {} character limit",
                longest, MAX_SUMMARY_CHARS
            ));
        }

        Ok(())
    }
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        Self {
            styles: StyleDefaults::default(),
            words_per_minute: 250,
            summary: SummaryLimits::default(),
        }
    }
}
