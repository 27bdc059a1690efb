//! Task repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::Task;
use crate::Result;

use super::db::Database;

/// Repository wrapper around `SQLite` for task records.
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TaskRow {
    todo_id: String,
    num: i64,
    task: String,
    done: i64,
    meta_due: String,
    meta_assigned_to: String,
}

impl TaskRow {
    /// Convert a database row into the domain model.
    fn into_task(self) -> Task {
        Task {
            todo_id: self.todo_id,
            num: u32::try_from(self.num).unwrap_or(0),
            text: self.task,
            done: self.done != 0,
            due: self.meta_due,
            assigned_to: self.meta_assigned_to,
        }
    }
}

impl TaskRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Next task number for a list: highest existing number plus one,
    /// starting at 1 for an empty list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn next_num(&self, todo_id: &str) -> Result<u32> {
        let highest: Option<i64> =
            sqlx::query_scalar("SELECT MAX(num) FROM tasks WHERE todo_id = ?1")
                .bind(todo_id)
                .fetch_one(self.db.as_ref())
                .await?;

        Ok(highest.map_or(1, |n| u32::try_from(n).unwrap_or(0) + 1))
    }

    /// Insert a new task record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the database insert fails.
    pub async fn insert(&self, task: &Task) -> Result<()> {
        sqlx::query(
            "INSERT INTO tasks (todo_id, num, task, done, meta_due, meta_assigned_to)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&task.todo_id)
        .bind(i64::from(task.num))
        .bind(&task.text)
        .bind(i64::from(task.done))
        .bind(&task.due)
        .bind(&task.assigned_to)
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// Retrieve one task by list and number.
    ///
    /// Returns `Ok(None)` if the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, todo_id: &str, num: u32) -> Result<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as("SELECT * FROM tasks WHERE todo_id = ?1 AND num = ?2")
                .bind(todo_id)
                .bind(i64::from(num))
                .fetch_optional(self.db.as_ref())
                .await?;

        Ok(row.map(TaskRow::into_task))
    }

    /// List all tasks of a list, ordered by task number.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for(&self, todo_id: &str) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT * FROM tasks WHERE todo_id = ?1 ORDER BY num")
                .bind(todo_id)
                .fetch_all(self.db.as_ref())
                .await?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    /// Set the done flag of a task. Returns whether a row was changed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the update fails.
    pub async fn set_done(&self, todo_id: &str, num: u32, done: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET done = ?1 WHERE todo_id = ?2 AND num = ?3")
            .bind(i64::from(done))
            .bind(todo_id)
            .bind(i64::from(num))
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a task. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn remove(&self, todo_id: &str, num: u32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE todo_id = ?1 AND num = ?2")
            .bind(todo_id)
            .bind(i64::from(num))
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
