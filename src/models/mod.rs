//! Domain model module declarations.

pub mod list;
pub mod participant;
pub mod task;

pub use list::TodoList;
pub use participant::Participant;
pub use task::Task;
