//! The normalization pipeline.
//!
//! Model output arrives as a mix of markdown and HTML. Each stage below is a
//! regex rewrite over the output of the previous one, so the order matters:
//! markdown is converted or stripped first, then block spacing is fixed, then
//! default styles are injected, then whitespace is normalized.

use article_html_core::{SanitizerOptions, StyleDefaults};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("BOLD_RE: hardcoded regex is valid"));

static STAR_ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("STAR_ITALIC_RE: hardcoded regex is valid"));

static UNDERSCORE_ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([^_]+)_").expect("UNDERSCORE_ITALIC_RE: hardcoded regex is valid"));

static HEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^#{1,6}[ \t]+").expect("HEADING_MARKER_RE: hardcoded regex is valid")
});

static BULLET_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[*-][ \t]+").expect("BULLET_MARKER_RE: hardcoded regex is valid"));

static ORDERED_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\d+\.[ \t]+").expect("ORDERED_MARKER_RE: hardcoded regex is valid")
});

static ORPHAN_EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" [*_] ").expect("ORPHAN_EMPHASIS_RE: hardcoded regex is valid"));

static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\w*\n").expect("FENCE_OPEN_RE: hardcoded regex is valid"));

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```").expect("FENCE_RE: hardcoded regex is valid"));

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("TAG_RE: hardcoded regex is valid"));

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("LINK_RE: hardcoded regex is valid")
});

static HEADING_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(<h[1-6][^>]*>)").expect("HEADING_OPEN_RE: hardcoded regex is valid")
});

static HEADING_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</h[1-6]>)\s*").expect("HEADING_CLOSE_RE: hardcoded regex is valid"));

static BLOCK_GAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(</p>|</h[1-6]>)\s*(<p[\s>]|<h[1-6])").expect("BLOCK_GAP_RE: hardcoded regex is valid")
});

static EXCESS_NEWLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES_RE: hardcoded regex is valid"));

static TABLE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(table|th|td)\b([^>]*)>").expect("TABLE_TAG_RE: hardcoded regex is valid")
});

static BLOCKQUOTE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(blockquote)\b([^>]*)>").expect("BLOCKQUOTE_TAG_RE: hardcoded regex is valid")
});

static PRE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(pre)\b([^>]*)>").expect("PRE_TAG_RE: hardcoded regex is valid"));

static STYLED_DIV_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(<div\s+style=")([^"]*)""#).expect("STYLED_DIV_RE: hardcoded regex is valid")
});

static LIST_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<[uo]l\b[^>]*>)\s*").expect("LIST_OPEN_RE: hardcoded regex is valid"));

static LIST_ITEM_GAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</li>\s*<li\b").expect("LIST_ITEM_GAP_RE: hardcoded regex is valid"));

static LIST_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(</[uo]l>)").expect("LIST_CLOSE_RE: hardcoded regex is valid"));

static LIST_ITEM_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<li\b").expect("LIST_ITEM_OPEN_RE: hardcoded regex is valid"));

static LIST_ITEM_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</li>").expect("LIST_ITEM_CLOSE_RE: hardcoded regex is valid"));

static PRE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<pre\b[^>]*>)\s+").expect("PRE_OPEN_RE: hardcoded regex is valid"));

static PRE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+</pre>").expect("PRE_CLOSE_RE: hardcoded regex is valid"));

static CODE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<code\b[^>]*>)\s+").expect("CODE_OPEN_RE: hardcoded regex is valid"));

static CODE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+</code>").expect("CODE_CLOSE_RE: hardcoded regex is valid"));

static IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(<img\b[^>]*>)\s*").expect("IMG_RE: hardcoded regex is valid"));

static EMPTY_PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<p\b[^>]*>\s*</p>").expect("EMPTY_PARAGRAPH_RE: hardcoded regex is valid")
});

static EMPTY_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<h[1-6]\b[^>]*>\s*</h[1-6]>").expect("EMPTY_HEADING_RE: hardcoded regex is valid")
});

static HORIZONTAL_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("HORIZONTAL_SPACE_RE: hardcoded regex is valid"));

static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*\n\s*").expect("BLANK_LINE_RE: hardcoded regex is valid"));

/// Run the full normalization pipeline on raw model output.
pub(crate) fn run_pipeline(raw: &str, options: &SanitizerOptions) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut html = rewrite_text(raw, convert_emphasis);
    html = strip_line_markers(&html);
    html = rewrite_text(&html, |text| ORPHAN_EMPHASIS_RE.replace_all(text, " ").into_owned());
    html = convert_code_fences(&html);
    html = rewrite_text(&html, |text| {
        LINK_RE
            .replace_all(text, r#"<a href="${2}">${1}</a>"#)
            .into_owned()
    });
    html = space_blocks(&html);
    html = inject_styles(&html, &TABLE_TAG_RE, &options.styles);
    html = inject_styles(&html, &BLOCKQUOTE_TAG_RE, &options.styles);
    html = add_div_margins(&html, &options.styles.div_margin);
    html = space_lists(&html);
    html = trim_code_blocks(&html);
    html = inject_styles(&html, &PRE_TAG_RE, &options.styles);
    html = IMG_RE.replace_all(&html, "\n\n${1}\n\n").into_owned();
    html = remove_empty_blocks(&html);
    html = normalize_whitespace(html.trim());

    // Block spacing and trimming can move a marker to the start of a line, and
    // removing empty blocks can leave whitespace just inside a code block.
    let html = trim_code_blocks(&html);
    let cleaned = strip_line_markers(&html);

    log::trace!("sanitized {} bytes into {} bytes", raw.len(), cleaned.len());
    cleaned
}

/// Apply `rewrite` to the text between tags. Tags pass through untouched, so
/// attribute values like `target="_blank"` never see the markdown stages.
fn rewrite_text(input: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for tag in TAG_RE.find_iter(input) {
        output.push_str(&rewrite(&input[last..tag.start()]));
        output.push_str(tag.as_str());
        last = tag.end();
    }
    output.push_str(&rewrite(&input[last..]));
    output
}

/// `**bold**`, then `*italic*` and `_italic_`.
fn convert_emphasis(input: &str) -> String {
    let bold = BOLD_RE.replace_all(input, "<strong>${1}</strong>");
    let italic = STAR_ITALIC_RE.replace_all(&bold, "<em>${1}</em>");
    UNDERSCORE_ITALIC_RE
        .replace_all(&italic, "<em>${1}</em>")
        .into_owned()
}

/// Drop heading, bullet and ordered-list markers at line starts.
fn strip_line_markers(input: &str) -> String {
    let headings = HEADING_MARKER_RE.replace_all(input, "");
    let bullets = BULLET_MARKER_RE.replace_all(&headings, "");
    ORDERED_MARKER_RE.replace_all(&bullets, "").into_owned()
}

/// Replace triple-backtick fences with `<pre><code>` / `</code></pre>`.
///
/// Plain token replacement: every fence followed by an optional language and a
/// newline opens a block, any other fence closes one. A closing fence at the end
/// of a line therefore opens a second block.
fn convert_code_fences(input: &str) -> String {
    let opening = FENCE_OPEN_RE.find_iter(input).count();
    let opened = FENCE_OPEN_RE.replace_all(input, "<pre><code>");
    let closing = FENCE_RE.find_iter(&opened).count();

    if opening != closing {
        log::debug!(
            "unbalanced code fences: {} opening, {} closing",
            opening,
            closing
        );
    }

    FENCE_RE.replace_all(&opened, "</code></pre>").into_owned()
}

/// Blank lines around headings and between adjacent paragraphs/headings.
fn space_blocks(input: &str) -> String {
    let html = HEADING_OPEN_RE.replace_all(input, "\n\n${1}");
    let html = HEADING_CLOSE_RE.replace_all(&html, "${1}\n\n");
    let html = BLOCK_GAP_RE.replace_all(&html, "${1}\n\n${2}");
    EXCESS_NEWLINES_RE.replace_all(&html, "\n\n").into_owned()
}

/// Give matched tags their default style unless they already carry one.
///
/// The pattern must capture the tag name first and its attributes second.
fn inject_styles(input: &str, pattern: &Regex, styles: &StyleDefaults) -> String {
    pattern
        .replace_all(input, |caps: &Captures| {
            let tag = &caps[1];
            let attrs = &caps[2];
            match styles.for_tag(tag) {
                Some(style) if !attrs.contains("style=") => {
                    format!("<{} style=\"{}\"{}>", tag, style, attrs)
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Insert a margin before `background-color` in styled divs that have none.
fn add_div_margins(input: &str, margin: &str) -> String {
    STYLED_DIV_RE
        .replace_all(input, |caps: &Captures| {
            let prefix = &caps[1];
            let style = &caps[2];
            match style.find("background-color") {
                Some(pos) if !style.contains("margin:") => {
                    format!("{}{}{} {}\"", prefix, &style[..pos], margin, &style[pos..])
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Reset whitespace inside lists, then put every item on its own line.
fn space_lists(input: &str) -> String {
    let html = LIST_OPEN_RE.replace_all(input, "${1}\n");
    let html = LIST_ITEM_GAP_RE.replace_all(&html, "</li>\n<li");
    let html = LIST_CLOSE_RE.replace_all(&html, "\n${1}");
    let html = LIST_ITEM_OPEN_RE.replace_all(&html, "\n<li");
    LIST_ITEM_CLOSE_RE.replace_all(&html, "</li>\n").into_owned()
}

/// Trim whitespace just inside `<pre>` and `<code>`.
fn trim_code_blocks(input: &str) -> String {
    let html = PRE_OPEN_RE.replace_all(input, "${1}");
    let html = PRE_CLOSE_RE.replace_all(&html, "</pre>");
    let html = CODE_OPEN_RE.replace_all(&html, "${1}");
    CODE_CLOSE_RE.replace_all(&html, "</code>").into_owned()
}

fn remove_empty_blocks(input: &str) -> String {
    let html = EMPTY_PARAGRAPH_RE.replace_all(input, "");
    EMPTY_HEADING_RE.replace_all(&html, "").into_owned()
}

fn normalize_whitespace(input: &str) -> String {
    let html = HORIZONTAL_SPACE_RE.replace_all(input, " ");
    BLANK_LINE_RE.replace_all(&html, "\n\n").into_owned()
}
