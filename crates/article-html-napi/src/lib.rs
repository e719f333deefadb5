#![deny(clippy::all)]

use napi_derive::napi;

use article_html::{
    ArticleMetrics as RustArticleMetrics, HtmlSanitizer as RustHtmlSanitizer, SanitizerOptions,
};

#[napi(object)]
pub struct Options {
    pub words_per_minute: Option<u32>,
    pub table_style: Option<String>,
    pub th_style: Option<String>,
    pub td_style: Option<String>,
    pub blockquote_style: Option<String>,
    pub pre_style: Option<String>,
    pub div_margin: Option<String>,
    pub summary_min_chars: Option<u32>,
    pub summary_truncate_at: Option<u32>,
}

impl From<Options> for SanitizerOptions {
    fn from(opts: Options) -> Self {
        let mut result = SanitizerOptions::default();

        if let Some(wpm) = opts.words_per_minute {
            result.words_per_minute = wpm as usize;
        }

        let styles = &mut result.styles;
        for (value, target) in [
            (opts.table_style, &mut styles.table),
            (opts.th_style, &mut styles.th),
            (opts.td_style, &mut styles.td),
            (opts.blockquote_style, &mut styles.blockquote),
            (opts.pre_style, &mut styles.pre),
            (opts.div_margin, &mut styles.div_margin),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }

        if let Some(min_chars) = opts.summary_min_chars {
            result.summary.min_chars = min_chars as usize;
        }

        if let Some(truncate_at) = opts.summary_truncate_at {
            result.summary.truncate_at = truncate_at as usize;
        }

        result
    }
}

#[napi(object)]
pub struct ArticleMetrics {
    pub word_count: u32,
    pub reading_time: u32,
    pub title: String,
    pub meta_description: String,
}

impl From<RustArticleMetrics> for ArticleMetrics {
    fn from(metrics: RustArticleMetrics) -> Self {
        Self {
            word_count: saturate(metrics.word_count),
            reading_time: saturate(metrics.reading_time),
            title: metrics.title,
            meta_description: metrics.meta_description,
        }
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[napi(js_name = "HTMLSanitizer")]
pub struct HtmlSanitizer {
    inner: RustHtmlSanitizer,
}

#[napi]
impl HtmlSanitizer {
    #[napi(constructor)]
    pub fn new(options: Option<Options>) -> napi::Result<Self> {
        let inner = match options {
            Some(opts) => RustHtmlSanitizer::with_options(opts.into())
                .map_err(|e| napi::Error::from_reason(e.to_string()))?,
            None => RustHtmlSanitizer::new(),
        };
        Ok(Self { inner })
    }

    /// Normalize AI-generated markdown/HTML into clean HTML
    #[napi]
    pub fn sanitize(&self, content: Option<String>) -> String {
        self.inner.sanitize(content.as_deref())
    }

    #[napi]
    pub fn extract_text(&self, html: String) -> String {
        self.inner.extract_text(&html)
    }

    #[napi(js_name = "getWordCount")]
    pub fn word_count(&self, html: String) -> u32 {
        saturate(self.inner.word_count(&html))
    }

    #[napi(js_name = "getReadingTime")]
    pub fn reading_time(&self, html: String) -> u32 {
        saturate(self.inner.reading_time(&html))
    }

    #[napi]
    pub fn extract_meta_description(&self, html: String) -> String {
        self.inner.meta_description(&html)
    }

    #[napi]
    pub fn extract_title(&self, html: String) -> String {
        self.inner.title(&html)
    }

    /// Word count, reading time, title and meta description in one call
    #[napi]
    pub fn metrics(&self, html: String) -> ArticleMetrics {
        self.inner.metrics(&html).into()
    }

    #[napi(js_name = "stripHTML")]
    pub fn strip_html(&self, html: String) -> String {
        self.inner.strip_html(&html)
    }

    #[napi]
    pub fn to_markdown(&self, html: String) -> String {
        self.inner.to_markdown(&html)
    }

    #[napi(js_name = "isValidHTML")]
    pub fn is_valid_html(&self, html: String) -> bool {
        self.inner.is_valid_html(&html)
    }
}

/// Normalize AI-generated markdown/HTML with the default options
#[napi]
pub fn sanitize(content: Option<String>) -> String {
    article_html::sanitize(content.as_deref())
}

#[napi]
pub fn extract_text(html: String) -> String {
    article_html::extract_text(&html)
}

#[napi(js_name = "getWordCount")]
pub fn word_count(html: String) -> u32 {
    saturate(article_html::word_count(&html))
}

#[napi(js_name = "getReadingTime")]
pub fn reading_time(html: String) -> u32 {
    saturate(article_html::reading_time(&html))
}

#[napi]
pub fn extract_meta_description(html: String) -> String {
    article_html::extract_meta_description(&html)
}

#[napi]
pub fn extract_title(html: String) -> String {
    article_html::extract_title(&html)
}

#[napi(js_name = "stripHTML")]
pub fn strip_html(html: String) -> String {
    article_html::strip_html(&html)
}

#[napi]
pub fn to_markdown(html: String) -> String {
    article_html::to_markdown(&html)
}

#[napi(js_name = "isValidHTML")]
pub fn is_valid_html(html: String) -> bool {
    article_html::is_valid_html(&html)
}

/// Route `log` output to stderr. Uses `RUST_LOG` when no filter is given.
/// Returns false if a logger was already installed.
#[napi]
pub fn init_logging(filter: Option<String>) -> bool {
    let mut builder = match filter {
        Some(filter) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(&filter);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("article-html logging initialised");
    }
    installed
}
