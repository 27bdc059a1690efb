//! Inbound email payload shaping.
//!
//! Turns the mail provider's webhook JSON into a normalized
//! [`InboundEmail`] the parser can assume: plain-text body, unified line
//! endings, parsed From/Cc entries.

pub mod inbound;
pub mod normalize;

pub use inbound::{InboundEmail, InboundPayload};
