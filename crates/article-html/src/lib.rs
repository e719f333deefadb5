//! # article-html
//!
//! Normalize AI-generated article text into publishable HTML.
//!
//! Language models answer with a mix of markdown and HTML. [`sanitize`] turns
//! that mix into clean HTML: markdown emphasis, links and code fences become
//! tags, leftover heading and list markers are dropped, block spacing is
//! normalized, and tables, quotes and code blocks get default inline styles.
//! The metric functions compute what gets stored next to each article.
//!
//! ## Design
//!
//! The normalizer is an ordered pipeline of regex rewrites, not an HTML
//! parser. Malformed input never fails; a rewrite that does not match is a
//! no-op. Running [`sanitize`] on its own output returns it unchanged.
//!
//! ## Example
//!
//! ```rust
//! use article_html::{reading_time, sanitize, word_count};
//!
//! let html = sanitize("**Hello** *world*");
//! assert_eq!(html, "<strong>Hello</strong> <em>world</em>");
//! assert_eq!(sanitize(html.as_str()), html);
//!
//! assert_eq!(word_count(&html), 2);
//! assert_eq!(reading_time(&html), 1);
//! ```
//!
//! ## Example (custom options)
//!
//! ```rust
//! use article_html::{HtmlSanitizer, SanitizerOptions};
//!
//! let options = SanitizerOptions {
//!     words_per_minute: 200,
//!     ..Default::default()
//! };
//! let sanitizer = HtmlSanitizer::with_options(options).unwrap();
//! let metrics = sanitizer.metrics("<h1>Title</h1><p>Short body.</p>");
//! assert_eq!(metrics.title, "Title");
//! assert_eq!(metrics.word_count, 3);
//! ```

mod convert;
mod metrics;
mod pipeline;
mod service;
mod utilities;
mod validate;

use once_cell::sync::Lazy;

pub use article_html_core::{ArticleMetrics, SanitizerOptions, StyleDefaults, SummaryLimits};
pub use convert::{strip_html, to_markdown};
pub use metrics::extract_text;
pub use service::HtmlSanitizer;
pub use validate::is_valid_html;

/// Error type for article-html operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleHtmlError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, ArticleHtmlError>;

static DEFAULT_SANITIZER: Lazy<HtmlSanitizer> = Lazy::new(HtmlSanitizer::new);

/// Normalize raw model output with the default options.
///
/// `None` and the empty string both produce an empty string.
pub fn sanitize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    DEFAULT_SANITIZER.sanitize(raw)
}

/// Number of words in the visible text of `html`
pub fn word_count(html: &str) -> usize {
    DEFAULT_SANITIZER.word_count(html)
}

/// Reading time in minutes at 250 words per minute, at least 1
pub fn reading_time(html: &str) -> usize {
    DEFAULT_SANITIZER.reading_time(html)
}

/// Meta description from an explicit comment or the first paragraph
pub fn extract_meta_description(html: &str) -> String {
    DEFAULT_SANITIZER.meta_description(html)
}

/// Text of the first `<h1>`
pub fn extract_title(html: &str) -> String {
    DEFAULT_SANITIZER.title(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TABLE_STYLE: &str =
        "width: 100%; border-collapse: collapse; margin: 20px 0; border: 1px solid #e5e7eb;";
    const TD_STYLE: &str = "border: 1px solid #dee2e6; padding: 12px;";

    const ARTICLE: &str = r#"<!-- Meta Description: A practical guide to brewing coffee. -->
<h1>Brewing Better Coffee</h1>
<p>Great coffee starts with **fresh beans** and *patience*.</p>
<h2>Equipment</h2>
<ul><li>Grinder</li><li>Kettle</li></ul>
<p>Read the [full guide](https://example.com/guide) first.</p>
<blockquote>Coffee is a language in itself.</blockquote>
<div style="padding: 20px; background-color: #eef;">Tip box</div>
<table><tr><th>Method</th><th>Time</th></tr><tr><td>Pour over</td><td>3 min</td></tr></table>
<p></p>
<h3>  </h3>
<img src="beans.jpg" alt="Beans">
<p>Enjoy.</p>"#;

    const MARKDOWN_ARTICLE: &str = "## Why It Matters

Most guides skip the basics.

- Measure your water
- Grind just before brewing

1. Heat the water
2. Bloom the grounds

```python
print(\"brew\")
```

Final thoughts here.";

    #[test]
    fn test_scenario_emphasis() {
        assert_eq!(
            sanitize("**Hello** *world*"),
            "<strong>Hello</strong> <em>world</em>"
        );
    }

    #[test]
    fn test_scenario_heading_marker() {
        assert_eq!(sanitize("# Title\n\nSome text"), "Title\n\nSome text");
    }

    #[test]
    fn test_scenario_table_styles() {
        assert_eq!(
            sanitize("<table><tr><td>A</td></tr></table>"),
            format!(
                "<table style=\"{}\"><tr><td style=\"{}\">A</td></tr></table>",
                TABLE_STYLE, TD_STYLE
            )
        );
    }

    #[test]
    fn test_scenario_meta_comment() {
        assert_eq!(
            extract_meta_description("<!-- Meta Description: A great guide. -->\n<h1>Title</h1>"),
            "A great guide."
        );
    }

    #[test]
    fn test_scenario_five_hundred_words() {
        let paragraphs: Vec<String> = (0..10)
            .map(|p| {
                let words: Vec<String> = (0..50).map(|w| format!("w{}x{}", p, w)).collect();
                format!("<p>{}</p>", words.join(" "))
            })
            .collect();
        let html = paragraphs.join("\n");
        assert_eq!(word_count(&html), 500);
        assert_eq!(reading_time(&html), 2);
        assert_eq!(word_count(&sanitize(html.as_str())), 500);
    }

    #[test]
    fn test_scenario_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(None::<&str>), "");
        assert_eq!(word_count(""), 0);
        assert_eq!(reading_time(""), 1);
        assert_eq!(extract_title(""), "");
        assert_eq!(extract_meta_description(""), "");
    }

    #[test]
    fn test_full_article() {
        let html = sanitize(ARTICLE);
        assert!(html.starts_with("<!-- Meta Description: A practical guide to brewing coffee. -->\n\n<h1>Brewing Better Coffee</h1>\n\n"));
        assert!(html.contains("<p>Great coffee starts with <strong>fresh beans</strong> and <em>patience</em>.</p>"));
        assert!(html.contains("<ul>\n\n<li>Grinder</li>\n\n<li>Kettle</li>\n\n</ul>"));
        assert!(html.contains("<a href=\"https://example.com/guide\">full guide</a>"));
        assert!(html.contains("<div style=\"padding: 20px; margin: 24px 0; background-color: #eef;\">"));
        assert!(html.contains("\n\n<img src=\"beans.jpg\" alt=\"Beans\">\n\n<p>Enjoy.</p>"));
        assert!(!html.contains("<p></p>"));
        assert!(!html.contains("<h3>"));
        assert!(is_valid_html(&html));

        assert_eq!(extract_title(&html), "Brewing Better Coffee");
        assert_eq!(
            extract_meta_description(&html),
            "A practical guide to brewing coffee."
        );
    }

    #[test]
    fn test_idempotent_on_fixtures() {
        for raw in [ARTICLE, MARKDOWN_ARTICLE, "***both***", "<ol>\n <li>x</li>\n</ol>"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(once.as_str()), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_markdown_article() {
        let html = sanitize(MARKDOWN_ARTICLE);
        assert!(html.starts_with(
            "Why It Matters\n\nMost guides skip the basics.\n\nMeasure your water\nGrind just before brewing\n\nHeat the water\nBloom the grounds\n\n<pre style="
        ));
        // A closing fence at the end of a line opens a second block.
        assert!(html.contains("<code>print(\"brew\")\n<pre style="));
        assert!(html.ends_with("<code>Final thoughts here."));
        assert_eq!(html.matches("<pre style=").count(), 2);
        assert!(!html.contains("</code>"));
        assert!(!is_valid_html(&html));
    }

    #[test]
    fn test_export_round() {
        let html = sanitize(ARTICLE);
        let text = strip_html(&html);
        assert!(text.starts_with("Brewing Better Coffee\n\nGreat coffee starts with fresh beans and patience."));
        assert!(!text.contains('<'));

        let md = to_markdown(&html);
        assert!(md.starts_with("# Brewing Better Coffee\n\nGreat coffee starts with **fresh beans** and *patience*."));
        assert!(md.contains("## Equipment"));
        assert!(md.contains("- Grinder"));
        assert!(md.contains("[full guide](https://example.com/guide)"));
        assert!(md.contains("> Coffee is a language in itself."));
        assert!(md.contains("![Beans](beans.jpg)"));
    }

    const FRAGMENTS: &[&str] = &[
        "<h2>Section</h2>",
        "<p>Plain prose sentence.</p>",
        "**bold words**",
        "*soft emphasis*",
        "# Heading line",
        "- bullet item",
        "1. ordered item",
        "[a link](https://example.com/page)",
        "<ul><li>One</li><li>Two</li></ul>",
        "<ol>\n<li>First</li>\n</ol>",
        "<table><tr><th>H</th></tr><tr><td>D</td></tr></table>",
        "<blockquote>Quoted text</blockquote>",
        "<div style=\"background-color: #fef3c7;\">Callout</div>",
        "<img src=\"a.png\" alt=\"A\">",
        "<p></p>",
        "<h3> </h3>",
        "```rust\nfn main() {}\n```",
        "Some words here.",
        "<p>Para with  double  spaces</p>",
        "<p>See <a href=\"x\" target=\"_blank\">L</a></p>",
        "<img src=\"a_b_c.png\" alt=\"snake_case_name\">",
        "<my-widget>custom</my-widget>",
    ];

    /// Documents shaped like model output: blocks separated by line breaks.
    fn generated_article() -> impl Strategy<Value = String> {
        let block = prop::sample::select(FRAGMENTS.to_vec());
        let separator = prop::sample::select(vec!["\n", "\n\n", "\n\n\n", " \n"]);
        prop::collection::vec((block, separator), 1..10).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(block, separator)| format!("{}{}", block, separator))
                .collect::<String>()
        })
    }

    fn prose() -> impl Strategy<Value = String> {
        let sentence = prop::collection::vec("[A-Za-z]{1,10}[.,]?", 1..30)
            .prop_map(|words| words.join(" "));
        prop::collection::vec(sentence, 1..6).prop_map(|paragraphs| {
            paragraphs
                .iter()
                .map(|p| format!("<p>{}</p>", p))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(raw in generated_article()) {
            let once = sanitize(raw.as_str());
            prop_assert_eq!(sanitize(once.as_str()), once);
        }

        #[test]
        fn prop_sanitize_keeps_balance(raw in generated_article()) {
            // Fence replacement is a plain token replace and may unbalance.
            prop_assume!(!raw.contains("```"));
            prop_assume!(is_valid_html(&raw));
            prop_assert!(is_valid_html(&sanitize(raw.as_str())));
        }

        #[test]
        fn prop_prose_word_count_unchanged(html in prose()) {
            prop_assert_eq!(word_count(&sanitize(html.as_str())), word_count(&html));
        }

        #[test]
        fn prop_reading_time_formula(html in prose()) {
            let expected = std::cmp::max(1, word_count(&html).div_ceil(250));
            prop_assert_eq!(reading_time(&html), expected);
        }

        #[test]
        fn prop_sanitize_never_panics(raw in "\\PC{0,200}") {
            let _ = sanitize(raw.as_str());
            let _ = to_markdown(&raw);
            let _ = strip_html(&raw);
            let _ = extract_meta_description(&raw);
        }
    }
}
