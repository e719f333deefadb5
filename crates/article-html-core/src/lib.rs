//! article-html-core - configuration and metric types
//!
//! This crate holds the plain value types shared by `article-html` (the
//! normalization pipeline) and `article-html-napi` (the Node binding):
//! the injected style strings, the reading-speed and summary limits, and the
//! [`ArticleMetrics`] record computed for every stored article.
//!
//! # Example
//!
//! ```rust
//! use article_html_core::{reading_minutes, SanitizerOptions};
//!
//! let options = SanitizerOptions::default();
//! assert_eq!(options.words_per_minute, 250);
//! assert_eq!(reading_minutes(500, options.words_per_minute), 2);
//! assert_eq!(reading_minutes(0, options.words_per_minute), 1);
//! ```

mod elements;
mod metrics;
mod options;

pub use elements::{is_void, VOID_ELEMENTS};
pub use metrics::{reading_minutes, truncate_summary, ArticleMetrics};
pub use options::{SanitizerOptions, StyleDefaults, SummaryLimits, MAX_SUMMARY_CHARS};
