//! Email-body command parsing.
//!
//! Pure functions that turn loosely-structured email subjects and bodies
//! into structured intent: which list is targeted, which action the sender
//! wants, how a creation body splits into description and tasks, and what
//! inline metadata a task carries. Everything here is synchronous and
//! deterministic; malformed input degrades to a defined fallback, never
//! an error.

pub mod address;
pub mod command;
pub mod dates;
pub mod meta;
pub mod subject;
pub mod tasklist;

pub use address::{parse_address_list, parse_single_address, MailAddress};
pub use command::{extract_command, Command};
pub use meta::{extract_task_meta, TaskMeta};
pub use subject::extract_list_id;
pub use tasklist::{extract_todo_list, ParsedList};

/// Normalize line endings to UNIX line feeds.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
