//! Description / task-list splitting for creation-email bodies.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize_newlines;

/// Result of splitting a creation email's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedList {
    /// Free text appearing before the first task line, trimmed.
    pub description: String,
    /// One entry per bullet line, in body order, markup left intact.
    pub tasks: Vec<String>,
}

/// A task line starts (after optional leading spaces or tabs) with a `-`
/// or `*` bullet followed by whitespace. Anchoring to line starts keeps
/// inline markdown emphasis (`**bold**`) from being taken for a bullet,
/// and `[ \t]` instead of `\s` keeps the anchor from drifting across
/// newlines.
static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?m)^[ \t]*[-*][ \t]+(.*)$").expect("valid task-line pattern")
});

/// Split a creation email's body into a description and an ordered task list.
///
/// The description is everything before the first task line; when no task
/// line exists the whole body is the description. Each task is confined to
/// its bullet line, trimmed, with the original Unicode content (and any
/// inline `[...]` metadata markup) preserved verbatim; metadata extraction
/// is a separate pass over the returned task string.
#[must_use]
pub fn extract_todo_list(body: &str) -> ParsedList {
    let body = normalize_newlines(body);

    let Some(first) = TASK_LINE.find(&body) else {
        return ParsedList {
            description: body.trim().to_owned(),
            tasks: Vec::new(),
        };
    };

    let description = body[..first.start()].trim().to_owned();
    let tasks = TASK_LINE
        .captures_iter(&body)
        .map(|caps| caps[1].trim().to_owned())
        .collect();

    ParsedList { description, tasks }
}
