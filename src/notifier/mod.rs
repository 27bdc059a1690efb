//! Participant notifications for list creation and updates.

pub mod mailer;
pub mod render;

pub use mailer::{Mailer, MailerRuntime, OutgoingMessage};
