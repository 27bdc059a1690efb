//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Inbound address routing configuration.
///
/// The mail provider forwards everything sent to the service domain; which
/// flow runs is decided by the `To` address of the inbound email.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct InboundConfig {
    /// Emails to this address create a new list.
    pub create_address: String,
    /// Emails to this address update an existing list.
    pub update_address: String,
}

/// Outbound mail API configuration.
///
/// The API key is loaded at runtime via OS keychain or environment
/// variables, not from the TOML config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MailerConfig {
    /// Messages endpoint of the HTTP mail API (Mailgun-style).
    pub api_url: String,
    /// Sender header for all outgoing notifications.
    pub sender: String,
    /// API key for the mail provider (populated at runtime).
    #[serde(skip)]
    pub api_key: String,
}

fn default_http_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("inbox-todo.db")
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// HTTP port the webhook listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Path of the `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Inbound address routing.
    pub inbound: InboundConfig,
    /// Outbound mail API settings.
    pub mailer: MailerConfig,
    /// Shared secret the provider appends as `?key=` (populated at runtime).
    #[serde(skip)]
    pub security_key: String,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load secrets from OS keychain with env-var fallback.
    ///
    /// Tries the `inbox-todo` keyring service first, then falls back to
    /// the `INBOX_TODO_SECURITY_KEY` / `INBOX_TODO_MAIL_API_KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// the required secrets.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.security_key = load_credential("security_key", "INBOX_TODO_SECURITY_KEY").await?;
        self.mailer.api_key = load_credential("mail_api_key", "INBOX_TODO_MAIL_API_KEY").await?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.inbound.create_address.trim().is_empty()
            || self.inbound.update_address.trim().is_empty()
        {
            return Err(AppError::Config(
                "inbound create_address and update_address must not be empty".into(),
            ));
        }

        if self.inbound.create_address == self.inbound.update_address {
            return Err(AppError::Config(
                "inbound create_address and update_address must differ".into(),
            ));
        }

        if self.mailer.api_url.trim().is_empty() {
            return Err(AppError::Config("mailer api_url must not be empty".into()));
        }

        if self.mailer.sender.trim().is_empty() {
            return Err(AppError::Config("mailer sender must not be empty".into()));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // Try OS keychain first via spawn_blocking (keyring is synchronous I/O).
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new("inbox-todo", &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    // Fallback to environment variable.
    env::var(env_key).map_err(|_| {
        AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))
    })
}
