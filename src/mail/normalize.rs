//! Email body normalization.
//!
//! The parser operates on plain text with UNIX line feeds; these
//! transforms get both plain and HTML provider bodies into that shape.

use std::sync::LazyLock;

use regex::Regex;

static CLOSING_DIV: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)</div\s*>\n*").expect("valid div pattern")
});

static CLOSING_P: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)</p\s*>\n*").expect("valid p pattern")
});

static BR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)<br\s*/?>\n*").expect("valid br pattern")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"<[^>]*>").expect("valid tag pattern")
});

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"\n{3,}").expect("valid newline pattern")
});

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalize a plain-text body: trim and unify line endings.
#[must_use]
pub fn normalize_plain_body(body: &str) -> String {
    normalize_newlines(body.trim())
}

/// Convert an HTML body to normalized plain text.
///
/// Closing paragraphs become blank lines and `<br>`s become newlines
/// before all remaining tags are stripped, so the block structure the
/// sender saw survives as line structure. Runs of three or more newlines
/// collapse to a paragraph break.
#[must_use]
pub fn normalize_html_body(html: &str) -> String {
    let text = normalize_newlines(html);

    // Simulate the visual line breaks of block elements.
    let text = CLOSING_DIV.replace_all(&text, "</div>\n");
    let text = CLOSING_P.replace_all(&text, "</p>\n\n");
    let text = BR.replace_all(&text, "\n");

    let text = ANY_TAG.replace_all(&text, "");
    let text = text.trim();

    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}
