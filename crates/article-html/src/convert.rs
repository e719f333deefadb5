//! Export converters: HTML to plain text and HTML to Markdown.
//!
//! Both are best-effort rewrites over normalized article HTML. Neither is meant
//! to round-trip with [`crate::sanitize`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::utilities::{clean_attribute, tag_attribute};

static BR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("BR_RE: hardcoded regex is valid"));

static BLOCK_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(?:p|h[1-6])>").expect("BLOCK_CLOSE_RE: hardcoded regex is valid"));

static LINE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(?:li|div)>").expect("LINE_CLOSE_RE: hardcoded regex is valid"));

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("TAG_RE: hardcoded regex is valid"));

// Any whitespace except the newline itself, so &nbsp; collapses too.
static INLINE_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("INLINE_SPACE_RE: hardcoded regex is valid"));

static LINE_EDGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("LINE_EDGE_RE: hardcoded regex is valid"));

static EXCESS_NEWLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES_RE: hardcoded regex is valid"));

static CODE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<pre\b[^>]*>\s*<code\b[^>]*>(.*?)</code>\s*</pre>")
        .expect("CODE_BLOCK_RE: hardcoded regex is valid")
});

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<h([1-4])\b[^>]*>(.*?)</h[1-4]>").expect("HEADING_RE: hardcoded regex is valid")
});

static STRONG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:strong|b)\b[^>]*>(.*?)</(?:strong|b)>")
        .expect("STRONG_RE: hardcoded regex is valid")
});

static EM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:em|i)\b[^>]*>(.*?)</(?:em|i)>").expect("EM_RE: hardcoded regex is valid")
});

static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<code\b[^>]*>(.*?)</code>").expect("INLINE_CODE_RE: hardcoded regex is valid")
});

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<a\b([^>]*)>(.*?)</a>").expect("LINK_RE: hardcoded regex is valid"));

static IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<img\b([^>]*)>").expect("IMG_RE: hardcoded regex is valid"));

static HR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<hr\b[^>]*>").expect("HR_RE: hardcoded regex is valid"));

static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<li\b[^>]*>(.*?)</li>").expect("LIST_ITEM_RE: hardcoded regex is valid")
});

static LIST_WRAPPER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(?:ul|ol)\b[^>]*>").expect("LIST_WRAPPER_RE: hardcoded regex is valid"));

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<p\b[^>]*>(.*?)</p>").expect("PARAGRAPH_RE: hardcoded regex is valid"));

static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<blockquote\b[^>]*>(.*?)</blockquote>")
        .expect("BLOCKQUOTE_RE: hardcoded regex is valid")
});

/// Convert HTML to plain text for export.
///
/// Paragraph and heading ends become blank lines, list item and div ends
/// become line breaks, and entities are decoded once the tags are gone.
pub fn strip_html(html: &str) -> String {
    let text = BR_RE.replace_all(html, "\n");
    let text = BLOCK_CLOSE_RE.replace_all(&text, "\n\n");
    let text = LINE_CLOSE_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    let text = INLINE_SPACE_RE.replace_all(&text, " ");
    let text = LINE_EDGE_RE.replace_all(&text, "\n");
    EXCESS_NEWLINES_RE.replace_all(&text, "\n\n").trim().to_string()
}

/// Convert article HTML back to Markdown.
pub fn to_markdown(html: &str) -> String {
    let md = CODE_BLOCK_RE.replace_all(html, |caps: &Captures| {
        format!("\n```\n{}\n```\n\n", caps[1].trim())
    });
    let md = HEADING_RE.replace_all(&md, |caps: &Captures| {
        let level: usize = caps[1].parse().unwrap_or(1);
        format!("{} {}\n\n", "#".repeat(level), caps[2].trim())
    });
    let md = STRONG_RE.replace_all(&md, "**${1}**");
    let md = EM_RE.replace_all(&md, "*${1}*");
    let md = INLINE_CODE_RE.replace_all(&md, "`${1}`");
    let md = LINK_RE.replace_all(&md, |caps: &Captures| {
        let href = clean_attribute(tag_attribute(&caps[1], "href").as_deref());
        if href.is_empty() {
            caps[2].to_string()
        } else {
            format!("[{}]({})", &caps[2], href)
        }
    });
    let md = IMG_RE.replace_all(&md, |caps: &Captures| {
        let src = clean_attribute(tag_attribute(&caps[1], "src").as_deref());
        if src.is_empty() {
            return String::new();
        }
        let alt = clean_attribute(tag_attribute(&caps[1], "alt").as_deref());
        format!("![{}]({})", alt, src)
    });
    let md = BR_RE.replace_all(&md, "\n");
    let md = HR_RE.replace_all(&md, "\n---\n\n");
    let md = LIST_ITEM_RE.replace_all(&md, |caps: &Captures| format!("- {}\n", caps[1].trim()));
    let md = LIST_WRAPPER_RE.replace_all(&md, "\n");
    let md = PARAGRAPH_RE.replace_all(&md, |caps: &Captures| format!("{}\n\n", caps[1].trim()));
    let md = BLOCKQUOTE_RE.replace_all(&md, |caps: &Captures| {
        let quoted: Vec<String> = caps[1]
            .trim()
            .lines()
            .map(|line| {
                let line = line.trim();
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect();
        format!("{}\n\n", quoted.join("\n"))
    });
    let md = TAG_RE.replace_all(&md, "");
    EXCESS_NEWLINES_RE.replace_all(&md, "\n\n").trim().to_string()
}
