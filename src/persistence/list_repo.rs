//! List repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::Utc;

use crate::models::TodoList;
use crate::{AppError, Result};

use super::db::Database;

/// Repository wrapper around `SQLite` for list records.
#[derive(Clone)]
pub struct ListRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct ListRow {
    id: String,
    owner: String,
    title: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl ListRow {
    /// Convert a database row into the domain model.
    fn into_list(self) -> Result<TodoList> {
        let created_at = parse_timestamp(&self.created_at, "created_at")?;
        let updated_at = parse_timestamp(&self.updated_at, "updated_at")?;

        Ok(TodoList {
            id: self.id,
            owner: self.owner,
            title: self.title,
            description: self.description,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(raw: &str, column: &str) -> Result<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| AppError::Db(format!("invalid {column}: {err}")))
}

impl ListRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new list record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the database insert fails.
    pub async fn create(&self, list: &TodoList) -> Result<()> {
        sqlx::query(
            "INSERT INTO lists (id, owner, title, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&list.id)
        .bind(&list.owner)
        .bind(&list.title)
        .bind(&list.description)
        .bind(list.created_at.to_rfc3339())
        .bind(list.updated_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// Retrieve a list by identifier.
    ///
    /// Returns `Ok(None)` if the list does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<TodoList>> {
        let row: Option<ListRow> = sqlx::query_as("SELECT * FROM lists WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.map(ListRow::into_list).transpose()
    }

    /// Bump a list's `updated_at` timestamp to now.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the update fails.
    pub async fn touch(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE lists SET updated_at = ?1 WHERE id = ?2")
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        Ok(())
    }
}
