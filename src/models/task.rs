//! List task model.

use serde::{Deserialize, Serialize};

use crate::parser::TaskMeta;

/// A single actionable line item within a list.
///
/// The `text` field keeps the raw task string including any inline
/// `[...]` markup; the extracted metadata lives in `due` and
/// `assigned_to`. Stripping the markup for display is the notifier's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    /// Identifier of the owning list.
    pub todo_id: String,
    /// Task number within the list, starting at 1.
    pub num: u32,
    /// Raw task description as it appeared in the email.
    pub text: String,
    /// Whether the task was accomplished.
    pub done: bool,
    /// Normalized or verbatim due value; empty when absent.
    pub due: String,
    /// Resolved assignee email or verbatim name; empty when absent.
    pub assigned_to: String,
}

impl Task {
    /// Construct an open task from raw text and its extracted metadata.
    #[must_use]
    pub fn new(todo_id: String, num: u32, text: String, meta: TaskMeta) -> Self {
        Self {
            todo_id,
            num,
            text,
            done: false,
            due: meta.due,
            assigned_to: meta.assigned_to,
        }
    }
}
