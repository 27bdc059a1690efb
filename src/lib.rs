#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod http;
pub mod mail;
pub mod models;
pub mod notifier;
pub mod parser;
pub mod persistence;
pub mod service;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
