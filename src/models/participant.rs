//! List participant model.

use serde::{Deserialize, Serialize};

/// A person associated with a list via email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    /// Identifier of the owning list.
    pub todo_id: String,
    /// The participant's email address.
    pub email: String,
    /// Parsed display name; may be empty, in which case persistence
    /// falls back to the email address.
    pub name: String,
    /// Message-ID of the participant's most recent email, kept for
    /// threading reply notifications.
    pub last_message_id: String,
}

impl Participant {
    /// Construct a participant entry for a list.
    #[must_use]
    pub fn new(todo_id: String, email: String, name: String, last_message_id: String) -> Self {
        Self {
            todo_id,
            email,
            name,
            last_message_id,
        }
    }
}
