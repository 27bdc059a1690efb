//! `SQLite` persistence: connection pool, schema, and repositories.

pub mod db;
pub mod list_repo;
pub mod participant_repo;
pub mod schema;
pub mod task_repo;

pub use db::Database;
pub use list_repo::ListRepo;
pub use participant_repo::ParticipantRepo;
pub use task_repo::TaskRepo;
