//! Tag balance check.

use article_html_core::is_void;
use once_cell::sync::Lazy;
use regex::Regex;

static OPEN_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([a-zA-Z][\w-]*)[^>]*>").expect("OPEN_TAG_RE: hardcoded regex is valid")
});

static CLOSE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</([a-zA-Z][\w-]*)\s*>").expect("CLOSE_TAG_RE: hardcoded regex is valid")
});

/// Compare the number of opening tags (void elements excluded) with the number
/// of closing tags.
///
/// Only the totals are compared: nesting order and tag names are not checked,
/// so `<p><em></p></em>` and `<p></div>` both count as balanced. Comments and
/// doctypes are not tags here.
pub fn is_valid_html(html: &str) -> bool {
    let opening = OPEN_TAG_RE
        .captures_iter(html)
        .filter(|caps| !is_void(&caps[1]))
        .count();
    let closing = CLOSE_TAG_RE.find_iter(html).count();

    if opening != closing {
        log::debug!("tag mismatch: {} opening, {} closing", opening, closing);
    }

    opening == closing
}
