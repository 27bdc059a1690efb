//! Inline task metadata extraction: due dates and assignees.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Participant;

use super::dates;

/// Metadata extracted from a single task's inline `[...]` markup.
///
/// Both fields are empty strings when the corresponding markup is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMeta {
    /// Normalized `YYYY-MM-DD 00:00:00` date, or the verbatim raw value
    /// when it could not be interpreted as a date.
    pub due: String,
    /// Resolved participant email, a literal email from the markup, or
    /// the verbatim name when no participant matched.
    pub assigned_to: String,
}

/// `[... due: <value> ...]`: the `due` keyword is case-sensitive, the
/// bracket may carry other key/value pairs, and the value runs to the
/// first closing bracket. The keyword must open the bracket or follow
/// whitespace or a comma, so keys like `overdue` do not match.
static DUE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"\[(?:[^\]]*[\s,])?due\s*:\s*([^\]]*)\]").expect("valid due pattern")
});

/// `[... assigned to: <value> ...]`, same bracket rules as `due`.
static ASSIGNED_TO: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"\[(?:[^\]]*[\s,])?assigned\s+to\s*:\s*([^\]]*)\]")
        .expect("valid assigned-to pattern")
});

/// Conservative full-value email check, mirroring the address parser's
/// pattern: ASCII local part, dotted domain, 2-4 letter TLD.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,4}$").expect("valid email pattern")
});

/// Acceptance threshold for fuzzy name resolution, in percent. Kept at the
/// historical value for compatibility with stored lists; short names can
/// clear it on thin evidence.
const SIMILARITY_THRESHOLD: f64 = 75.0;

/// Extract due date and assignee from a task's inline markup.
///
/// The two extractions are independent; a task may carry neither, either,
/// or both, in any order and spacing. The task text itself is not
/// modified; stripping the markup for display is the notifier's job.
#[must_use]
pub fn extract_task_meta(task: &str, participants: &[Participant]) -> TaskMeta {
    let due = DUE
        .captures(task)
        .map_or_else(String::new, |caps| dates::normalize_due(caps[1].trim()));

    let assigned_to = ASSIGNED_TO
        .captures(task)
        .map_or_else(String::new, |caps| {
            resolve_assignee(caps[1].trim(), participants)
        });

    TaskMeta { due, assigned_to }
}

/// Resolve an assignee value against the list's participants.
///
/// A literal email address always wins. Otherwise the value is treated as
/// a name: first a case-insensitive exact match on display names, then a
/// fuzzy linear scan comparing the candidate against each email's local
/// part. The scan is a plain list walk; lists have tens of
/// participants at most, and first-in-list-order is the tie-break.
fn resolve_assignee(value: &str, participants: &[Participant]) -> String {
    if EMAIL.is_match(value) {
        return value.to_owned();
    }

    let candidate = value.to_lowercase();

    for participant in participants {
        if participant.name.to_lowercase() == candidate {
            return participant.email.clone();
        }
    }

    for participant in participants {
        let local_part = participant.email.split('@').next().unwrap_or("");
        if similarity_percent(&candidate, &local_part.to_lowercase()) > SIMILARITY_THRESHOLD {
            return participant.email.clone();
        }
    }

    value.to_owned()
}

/// Symmetric character-overlap ratio in percent.
///
/// This is the lossy `similar_text` comparison, not an edit distance:
/// the longest common substring is counted, then the remainders on each
/// side are compared recursively and the counts summed.
fn similarity_percent(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)] // Name lengths are tiny.
    let ratio = 2.0 * common_chars(&a, &b) as f64 / (a.len() + b.len()) as f64;
    ratio * 100.0
}

/// Count overlapping characters: longest common substring, plus the
/// overlap of the left remainders, plus the overlap of the right ones.
fn common_chars(a: &[char], b: &[char]) -> usize {
    let (pos_a, pos_b, len) = longest_common_run(a, b);
    if len == 0 {
        return 0;
    }

    len + common_chars(&a[..pos_a], &b[..pos_b])
        + common_chars(&a[pos_a + len..], &b[pos_b + len..])
}

/// Locate the longest common substring of `a` and `b`.
fn longest_common_run(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let (mut best_a, mut best_b, mut best_len) = (0, 0, 0);

    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut len = 0;
            while i + len < a.len() && j + len < b.len() && a[i + len] == b[j + len] {
                len += 1;
            }
            if len > best_len {
                (best_a, best_b, best_len) = (i, j, len);
            }
        }
    }

    (best_a, best_b, best_len)
}
