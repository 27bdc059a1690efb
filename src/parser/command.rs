//! Action classification for update-email bodies.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize_newlines;

/// Normalized intent extracted from an update email's body.
///
/// The parameter type is fixed by the variant: `Add` and `Comment` carry
/// free text, the task mutations carry the targeted task number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new task; the text may carry inline `[...]` markup.
    Add(String),
    /// Remove the numbered task.
    Delete(u32),
    /// Mark the numbered task as accomplished.
    Done(u32),
    /// Mark the numbered task as open again.
    Reset(u32),
    /// No keyword matched; the first paragraph is kept as a comment.
    Comment(String),
}

/// `add` keyword at start of body, colon optional, parameter = rest of the
/// matched line. `\b` keeps `additional...` from classifying as an Add.
static ADD: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)^add\b\s*:?[ \t]*(.*)").expect("valid add pattern")
});

/// Numeric commands require digits but no separator: `delete 3` and
/// `DELETE122` are both valid.
static DELETE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)^delete\s*(\d+)").expect("valid delete pattern")
});

static DONE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)^done\s*(\d+)").expect("valid done pattern")
});

static RESET: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)^reset\s*(\d+)").expect("valid reset pattern")
});

/// Classify an update email's body into a [`Command`].
///
/// Matching is ordered and first-match-wins, anchored at the start of the
/// trimmed body after newline normalization. Keywords appearing mid-body
/// never trigger an action. A numeric keyword without digits (`delete a`)
/// is not a mutation and falls through to `Comment`, whose parameter is
/// the first paragraph of the body.
#[must_use]
pub fn extract_command(body: &str) -> Command {
    let body = normalize_newlines(body);
    let body = body.trim();

    if let Some(caps) = ADD.captures(body) {
        return Command::Add(caps[1].trim().to_owned());
    }

    // Digit runs longer than a u32 are nonsensical task numbers; let them
    // fall through to Comment rather than saturate.
    if let Some(n) = capture_number(&DELETE, body) {
        return Command::Delete(n);
    }
    if let Some(n) = capture_number(&DONE, body) {
        return Command::Done(n);
    }
    if let Some(n) = capture_number(&RESET, body) {
        return Command::Reset(n);
    }

    Command::Comment(first_paragraph(body))
}

fn capture_number(pattern: &Regex, body: &str) -> Option<u32> {
    pattern
        .captures(body)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// Text up to the first blank-line boundary, or the whole body.
fn first_paragraph(body: &str) -> String {
    body.split("\n\n").next().unwrap_or(body).trim().to_owned()
}
