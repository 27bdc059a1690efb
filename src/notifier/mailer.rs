//! Outbound mail delivery with a small buffered send queue.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::{info, warn};

use crate::config::MailerConfig;
use crate::{AppError, Result};

const QUEUE_CAPACITY: usize = 256;
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 5;

/// One email to be delivered through the HTTP mail API.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line, including the `[id:...]` reply marker.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Mail sender that owns a rate-limited outgoing queue.
///
/// Messages are posted as form data to a Mailgun-style messages endpoint
/// with the API key as basic-auth password. Failures back off
/// exponentially; a message is dropped (with an error log) after
/// [`MAX_ATTEMPTS`] so one dead recipient cannot wedge the queue.
pub struct Mailer {
    queue_tx: mpsc::Sender<OutgoingMessage>,
}

/// Join handle for the mailer background task.
pub struct MailerRuntime {
    /// The queue worker task.
    pub queue_task: JoinHandle<()>,
}

impl Mailer {
    /// Start the mailer and its background sender task.
    #[must_use]
    pub fn start(config: &MailerConfig) -> (Self, MailerRuntime) {
        let (queue_tx, queue_rx) = mpsc::channel(QUEUE_CAPACITY);
        let queue_task = Self::spawn_worker(config.clone(), queue_rx);

        info!("mailer started with buffered queue");

        (Self { queue_tx }, MailerRuntime { queue_task })
    }

    /// Enqueue a message for async delivery.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Mail` if the message queue is full or closed.
    pub async fn enqueue(&self, message: OutgoingMessage) -> Result<()> {
        self.queue_tx
            .send(message)
            .await
            .map_err(|err| AppError::Mail(format!("failed to enqueue message: {err}")))
    }

    fn spawn_worker(
        config: MailerConfig,
        mut queue_rx: mpsc::Receiver<OutgoingMessage>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let client = reqwest::Client::new();
            while let Some(message) = queue_rx.recv().await {
                let mut backoff = INITIAL_RETRY_DELAY;
                for attempt in 1..=MAX_ATTEMPTS {
                    match post_message(&client, &config, &message).await {
                        Ok(()) => {
                            info!(to = %message.to, "sent notification email");
                            break;
                        }
                        Err(err) if attempt == MAX_ATTEMPTS => {
                            tracing::error!(
                                to = %message.to,
                                %err,
                                "giving up on notification after repeated failures"
                            );
                        }
                        Err(err) => {
                            warn!(to = %message.to, %err, delay = ?backoff, "mail post failed; retrying");
                            sleep(backoff).await;
                            backoff = (backoff * 2).min(MAX_RETRY_DELAY);
                        }
                    }
                }
            }
            info!("mail sender task exiting");
        })
    }
}

/// POST one message to the provider's messages endpoint.
async fn post_message(
    client: &reqwest::Client,
    config: &MailerConfig,
    message: &OutgoingMessage,
) -> Result<()> {
    let response = client
        .post(&config.api_url)
        .basic_auth("api", Some(&config.api_key))
        .form(&[
            ("from", config.sender.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.body.as_str()),
        ])
        .send()
        .await
        .map_err(|err| AppError::Mail(format!("mail api request failed: {err}")))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(AppError::Mail(format!(
            "mail api returned {}",
            response.status()
        )))
    }
}
