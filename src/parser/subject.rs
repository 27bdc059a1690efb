//! List identifier extraction from email subjects.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the `[id:<token>]` marker the notifier embeds in subjects.
/// The token is one or more word characters or literal dots, which covers
/// the UUID-like identifiers the system generates.
static LIST_ID: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?i)\[id:([\w.]+)\]").expect("valid list-id pattern")
});

/// Extract the list identifier from an email subject.
///
/// The subject is trimmed, then searched case-insensitively for an
/// `[id:...]` marker anywhere in the text. Arbitrary surrounding text,
/// including non-ASCII, is tolerated. Returns `None` when no marker is
/// present; never returns an empty identifier.
#[must_use]
pub fn extract_list_id(subject: &str) -> Option<String> {
    LIST_ID
        .captures(subject.trim())
        .map(|caps| caps[1].to_owned())
}
