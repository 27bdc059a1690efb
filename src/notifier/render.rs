//! Notification message composition.
//!
//! Each message is tailored to its recipient: the recipient's own
//! assignments read "you" where other participants see a name, and the
//! inline `[...]` markup the sender typed is stripped from the visible
//! task text. The raw markup stays in storage; stripping is a display
//! concern, not the parser's.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Task, TodoList};

/// Any bracketed markup chunk in a task string.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"\[[^\]]*\]").expect("valid markup pattern")
});

static DOUBLE_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"  +").expect("valid space pattern")
});

/// Subject line for all notifications about a list.
///
/// Carries the `[id:...]` marker so a plain reply routes back to the
/// update flow.
#[must_use]
pub fn notification_subject(list: &TodoList) -> String {
    format!("{} [id:{}]", list.title, list.id)
}

/// Visible task text with all bracket markup removed.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, "");
    DOUBLE_SPACE.replace_all(&stripped, " ").trim().to_owned()
}

/// Render the notification body for one recipient.
///
/// `event` is a one-line summary of what just happened ("Jane added task
/// 3: …", "New list created by …", a comment, …). The current state of
/// the list follows, tasks numbered with done markers and their metadata
/// appended.
#[must_use]
pub fn render_notification(
    list: &TodoList,
    tasks: &[Task],
    recipient_email: &str,
    event: &str,
) -> String {
    let mut body = String::new();

    body.push_str(event);
    body.push_str("\n\n");

    if !list.description.is_empty() {
        body.push_str(&list.description);
        body.push_str("\n\n");
    }

    for task in tasks {
        body.push_str(&render_task_line(task, recipient_email));
        body.push('\n');
    }

    // Sections above end with one or two trailing newlines; the footer
    // always sits after exactly one blank line.
    if !body.ends_with("\n\n") {
        body.push('\n');
    }
    body.push_str(
        "Reply to this email to update the list: \"add: <task>\", \
         \"done <number>\", \"reset <number>\" or \"delete <number>\". \
         Anything else is shared as a comment.\n",
    );

    body
}

/// One task line: number, done marker, clean text, metadata suffix.
fn render_task_line(task: &Task, recipient_email: &str) -> String {
    let marker = if task.done { "[x]" } else { "[ ]" };
    let mut line = format!("{}. {} {}", task.num, marker, strip_markup(&task.text));

    let mut notes = Vec::new();
    if !task.due.is_empty() {
        notes.push(format!("due: {}", task.due));
    }
    if !task.assigned_to.is_empty() {
        let who = if task.assigned_to == recipient_email {
            "you"
        } else {
            task.assigned_to.as_str()
        };
        notes.push(format!("assigned to: {who}"));
    }

    if !notes.is_empty() {
        line.push_str(&format!(" ({})", notes.join(", ")));
    }

    line
}
