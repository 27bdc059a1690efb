//! Participant repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::Participant;
use crate::Result;

use super::db::Database;

/// Repository wrapper around `SQLite` for participant records.
#[derive(Clone)]
pub struct ParticipantRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct ParticipantRow {
    todo_id: String,
    email: String,
    name: String,
    last_message_id: String,
}

impl ParticipantRow {
    /// Convert a database row into the domain model.
    fn into_participant(self) -> Participant {
        Participant {
            todo_id: self.todo_id,
            email: self.email,
            name: self.name,
            last_message_id: self.last_message_id,
        }
    }
}

impl ParticipantRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a participant or update an existing entry's name and
    /// message ID. A participant with no display name is stored under
    /// their email address so notifications always have something to
    /// address them by.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the upsert fails.
    pub async fn upsert(&self, participant: &Participant) -> Result<()> {
        let name = if participant.name.trim().is_empty() {
            participant.email.as_str()
        } else {
            participant.name.as_str()
        };

        sqlx::query(
            "INSERT INTO participants (todo_id, email, name, last_message_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (todo_id, email)
             DO UPDATE SET name = excluded.name, last_message_id = excluded.last_message_id",
        )
        .bind(&participant.todo_id)
        .bind(&participant.email)
        .bind(name)
        .bind(&participant.last_message_id)
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// List all participants of a list in insertion order.
    ///
    /// Insertion order matters: fuzzy assignee resolution takes the first
    /// participant clearing the similarity threshold.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for(&self, todo_id: &str) -> Result<Vec<Participant>> {
        let rows: Vec<ParticipantRow> =
            sqlx::query_as("SELECT * FROM participants WHERE todo_id = ?1 ORDER BY rowid")
                .bind(todo_id)
                .fetch_all(self.db.as_ref())
                .await?;

        Ok(rows.into_iter().map(ParticipantRow::into_participant).collect())
    }
}
