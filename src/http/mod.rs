//! HTTP webhook transport.

pub mod router;

pub use router::{build_router, serve, AppState};
