//! Webhook payload deserialization into a normalized inbound email.

use serde::Deserialize;

use crate::parser::{parse_address_list, parse_single_address, MailAddress};
use crate::{AppError, Result};

use super::normalize;

/// Header block of the provider's JSON payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadHeaders {
    /// Delivery address the sender wrote to.
    #[serde(rename = "To", default)]
    pub to: String,
    /// Raw From header.
    #[serde(rename = "From", default)]
    pub from: String,
    /// Email subject.
    #[serde(rename = "Subject", default)]
    pub subject: String,
    /// Message-ID header for reply threading.
    #[serde(rename = "Message-ID", default)]
    pub message_id: String,
    /// Raw Cc header, comma-separated.
    #[serde(rename = "Cc", default)]
    pub cc: String,
}

/// JSON body the mail provider POSTs for each received email.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundPayload {
    /// Parsed header subset.
    pub headers: Option<PayloadHeaders>,
    /// Plain-text body part, when present.
    #[serde(default)]
    pub plain: Option<String>,
    /// HTML body part, used when no plain part exists.
    #[serde(default)]
    pub html: Option<String>,
}

/// A normalized inbound email, ready for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEmail {
    /// Bare delivery address, used to pick the create or update flow.
    pub to: String,
    /// Parsed sender entry.
    pub from: MailAddress,
    /// Trimmed subject.
    pub subject: String,
    /// Normalized plain-text body with UNIX line feeds.
    pub body: String,
    /// Message-ID header, may be empty.
    pub message_id: String,
    /// Parsed Cc entries, invalid ones dropped, order preserved.
    pub recipients: Vec<MailAddress>,
}

impl InboundEmail {
    /// Build a normalized email from the provider payload.
    ///
    /// The plain body part wins over the HTML part; an email with neither
    /// gets an empty body, which downstream classifies as a comment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Payload` when the payload carries no headers or
    /// no From header; without a sender there is nothing to do.
    pub fn from_payload(payload: InboundPayload) -> Result<Self> {
        let headers = payload
            .headers
            .ok_or_else(|| AppError::Payload("no headers found".into()))?;

        if headers.from.trim().is_empty() {
            return Err(AppError::Payload("no From header found".into()));
        }
        let from = parse_single_address(&headers.from);

        let body = match (payload.plain, payload.html) {
            (Some(plain), _) if !plain.trim().is_empty() => normalize::normalize_plain_body(&plain),
            (_, Some(html)) if !html.trim().is_empty() => normalize::normalize_html_body(&html),
            _ => String::new(),
        };

        let to = parse_single_address(&headers.to);
        let to = if to.address.is_empty() {
            headers.to.trim().to_owned()
        } else {
            to.address
        };

        Ok(Self {
            to,
            from,
            subject: headers.subject.trim().to_owned(),
            body,
            message_id: headers.message_id.trim().to_owned(),
            recipients: parse_address_list(&headers.cc),
        })
    }
}
