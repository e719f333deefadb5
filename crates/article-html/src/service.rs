//! HtmlSanitizer - the configured entry point for article normalization.

use article_html_core::{ArticleMetrics, SanitizerOptions};

use crate::{convert, metrics, pipeline, validate, ArticleHtmlError, Result};

/// Normalizes model output into publishable HTML and derives its metrics
#[derive(Debug, Clone)]
pub struct HtmlSanitizer {
    options: SanitizerOptions,
}

impl HtmlSanitizer {
    /// Create a new HtmlSanitizer with default options
    pub fn new() -> Self {
        Self {
            options: SanitizerOptions::default(),
        }
    }

    /// Create an HtmlSanitizer with custom options
    pub fn with_options(options: SanitizerOptions) -> Result<Self> {
        options.validate().map_err(ArticleHtmlError::InvalidOptions)?;
        Ok(Self { options })
    }

    /// Get the current options
    pub fn options(&self) -> &SanitizerOptions {
        &self.options
    }

    /// Normalize raw model output. `None` and `""` both yield an empty string.
    pub fn sanitize<'a>(&self, raw: impl Into<Option<&'a str>>) -> String {
        match raw.into() {
            Some(raw) => pipeline::run_pipeline(raw, &self.options),
            None => String::new(),
        }
    }

    pub fn extract_text(&self, html: &str) -> String {
        metrics::extract_text(html)
    }

    pub fn word_count(&self, html: &str) -> usize {
        metrics::word_count(html)
    }

    /// Reading time in whole minutes at the configured reading speed
    pub fn reading_time(&self, html: &str) -> usize {
        metrics::reading_time(html, self.options.words_per_minute)
    }

    pub fn meta_description(&self, html: &str) -> String {
        metrics::meta_description(html, &self.options.summary)
    }

    pub fn title(&self, html: &str) -> String {
        metrics::title(html)
    }

    /// Compute every stored metric of an article in one call
    pub fn metrics(&self, html: &str) -> ArticleMetrics {
        let word_count = self.word_count(html);
        ArticleMetrics {
            word_count,
            reading_time: article_html_core::reading_minutes(
                word_count,
                self.options.words_per_minute,
            ),
            title: self.title(html),
            meta_description: self.meta_description(html),
        }
    }

    pub fn strip_html(&self, html: &str) -> String {
        convert::strip_html(html)
    }

    pub fn to_markdown(&self, html: &str) -> String {
        convert::to_markdown(html)
    }

    pub fn is_valid_html(&self, html: &str) -> bool {
        validate::is_valid_html(html)
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_none() {
        let sanitizer = HtmlSanitizer::new();
        assert_eq!(sanitizer.sanitize(None::<&str>), "");
        assert_eq!(sanitizer.sanitize(""), "");
        assert_eq!(sanitizer.sanitize(Some("**x**")), "<strong>x</strong>");
    }

    #[test]
    fn test_with_invalid_options() {
        let options = SanitizerOptions {
            words_per_minute: 0,
            ..Default::default()
        };
        let err = HtmlSanitizer::with_options(options).unwrap_err();
        assert!(matches!(err, ArticleHtmlError::InvalidOptions(_)));
        assert!(err.to_string().starts_with("Invalid options:"));
    }

    #[test]
    fn test_custom_reading_speed() {
        let options = SanitizerOptions {
            words_per_minute: 200,
            ..Default::default()
        };
        let sanitizer = HtmlSanitizer::with_options(options).unwrap();
        let html = format!("<p>{}</p>", vec!["word"; 500].join(" "));
        assert_eq!(sanitizer.reading_time(&html), 3);
        assert_eq!(HtmlSanitizer::new().reading_time(&html), 2);
    }

    #[test]
    fn test_metrics() {
        let sanitizer = HtmlSanitizer::new();
        let html = sanitizer.sanitize(
            "<!-- Meta Description: How to brew. -->\n<h1>Brewing</h1><p>Fresh beans matter most.</p>",
        );
        let metrics = sanitizer.metrics(&html);
        assert_eq!(
            metrics,
            ArticleMetrics {
                word_count: 5,
                reading_time: 1,
                title: "Brewing".to_string(),
                meta_description: "How to brew.".to_string(),
            }
        );
    }
}
