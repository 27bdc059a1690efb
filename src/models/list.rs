//! Todo list model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared to-do list created from an inbound email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TodoList {
    /// Unique record identifier, embedded in notification subjects as
    /// `[id:...]` so replies route back to this list.
    pub id: String,
    /// Email address of the sender who created the list.
    pub owner: String,
    /// List title, taken from the creation email's subject.
    pub title: String,
    /// Free text preceding the first task line in the creation body.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    /// Construct a new list with a generated identifier.
    ///
    /// The identifier uses the hyphen-free simple UUID form so it stays
    /// within the `[\w.]` token class the subject extractor matches.
    #[must_use]
    pub fn new(owner: String, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            owner,
            title,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}
