//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS`, safe to
//! re-run on every server startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// Creates the three tables idempotently. Safe to call on every startup.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS lists (
    id              TEXT PRIMARY KEY NOT NULL,
    owner           TEXT NOT NULL,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    todo_id          TEXT NOT NULL,
    num              INTEGER NOT NULL,
    task             TEXT NOT NULL,
    done             INTEGER NOT NULL DEFAULT 0,
    meta_due         TEXT NOT NULL DEFAULT '',
    meta_assigned_to TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (todo_id, num)
);

CREATE TABLE IF NOT EXISTS participants (
    todo_id         TEXT NOT NULL,
    email           TEXT NOT NULL,
    name            TEXT NOT NULL,
    last_message_id TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (todo_id, email)
);

CREATE INDEX IF NOT EXISTS idx_tasks_list ON tasks(todo_id);
CREATE INDEX IF NOT EXISTS idx_participants_list ON participants(todo_id);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
