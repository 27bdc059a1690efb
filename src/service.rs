//! Inbox service: applies parsed email intent to the list aggregate.
//!
//! One inbound email, one synchronous pass: route by the delivery
//! address, parse, mutate through the repositories, fan out
//! notifications. Concurrent updates to the same list are serialized
//! only by `SQLite`'s writer lock; the parser's determinism keeps
//! provider retries safe.

use std::sync::Arc;

use tracing::{info, warn};

use crate::mail::InboundEmail;
use crate::models::{Participant, Task, TodoList};
use crate::notifier::{Mailer, OutgoingMessage};
use crate::notifier::render;
use crate::parser::{
    extract_command, extract_list_id, extract_task_meta, extract_todo_list, Command,
};
use crate::persistence::{Database, ListRepo, ParticipantRepo, TaskRepo};
use crate::{AppError, GlobalConfig, Result};

/// Result of processing one inbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxOutcome {
    /// A new list was created.
    Created {
        /// Identifier of the new list.
        list_id: String,
    },
    /// An existing list was updated or commented on.
    Updated {
        /// Identifier of the updated list.
        list_id: String,
    },
    /// The update referenced a task number that does not exist; nothing
    /// was changed and no notifications were sent.
    NoSuchTask {
        /// Identifier of the targeted list.
        list_id: String,
        /// The task number the sender referenced.
        num: u32,
    },
}

/// Applies inbound emails to lists and notifies participants.
pub struct InboxService {
    config: Arc<GlobalConfig>,
    db: Arc<Database>,
    mailer: Option<Arc<Mailer>>,
}

impl InboxService {
    /// Create a new service instance.
    #[must_use]
    pub fn new(config: Arc<GlobalConfig>, db: Arc<Database>, mailer: Option<Arc<Mailer>>) -> Self {
        Self { config, db, mailer }
    }

    /// Process one inbound email, routed by its delivery address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Payload` for an unrecognized delivery address,
    /// `AppError::NotFound` when an update email targets no known list,
    /// and `AppError::Db` on persistence failures.
    pub async fn handle(&self, email: InboundEmail) -> Result<InboxOutcome> {
        if email.to == self.config.inbound.create_address {
            self.create_list(email).await
        } else if email.to == self.config.inbound.update_address {
            self.update_list(email).await
        } else {
            Err(AppError::Payload(format!(
                "incorrect 'To' address: {}",
                email.to
            )))
        }
    }

    /// Create a new list from a creation email.
    async fn create_list(&self, email: InboundEmail) -> Result<InboxOutcome> {
        let parsed = extract_todo_list(&email.body);
        let list = TodoList::new(
            email.from.address.clone(),
            email.subject.clone(),
            parsed.description,
        );

        // Sender first, then Cc entries; list order is the resolution
        // tie-break for fuzzy assignees. The service's own addresses are
        // skipped so notifications never loop back into the webhook.
        let mut participants = vec![Participant::new(
            list.id.clone(),
            email.from.address.clone(),
            email.from.name.clone(),
            email.message_id.clone(),
        )];
        for recipient in &email.recipients {
            let known = participants.iter().any(|p| p.email == recipient.address);
            if known || self.is_service_address(&recipient.address) {
                continue;
            }
            participants.push(Participant::new(
                list.id.clone(),
                recipient.address.clone(),
                recipient.name.clone(),
                email.message_id.clone(),
            ));
        }

        let list_repo = ListRepo::new(Arc::clone(&self.db));
        let task_repo = TaskRepo::new(Arc::clone(&self.db));
        let participant_repo = ParticipantRepo::new(Arc::clone(&self.db));

        list_repo.create(&list).await?;
        for participant in &participants {
            participant_repo.upsert(participant).await?;
        }

        let mut tasks = Vec::with_capacity(parsed.tasks.len());
        for (idx, text) in parsed.tasks.into_iter().enumerate() {
            let meta = extract_task_meta(&text, &participants);
            let num = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            let task = Task::new(list.id.clone(), num, text, meta);
            task_repo.insert(&task).await?;
            tasks.push(task);
        }

        info!(list_id = %list.id, tasks = tasks.len(), "list created");

        let event = format!("{} created this list.", sender_display(&email));
        self.notify_participants(&list, &tasks, &participants, &event)
            .await;

        Ok(InboxOutcome::Created { list_id: list.id })
    }

    /// Apply an update email to an existing list.
    async fn update_list(&self, email: InboundEmail) -> Result<InboxOutcome> {
        let list_id = extract_list_id(&email.subject)
            .ok_or_else(|| AppError::NotFound("no list identifier in subject".into()))?;

        let list_repo = ListRepo::new(Arc::clone(&self.db));
        let task_repo = TaskRepo::new(Arc::clone(&self.db));
        let participant_repo = ParticipantRepo::new(Arc::clone(&self.db));

        let list = list_repo
            .get_by_id(&list_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown list: {list_id}")))?;

        let participants = participant_repo.list_for(&list.id).await?;
        let sender = sender_display(&email);

        let event = match extract_command(&email.body) {
            Command::Add(text) => {
                let meta = extract_task_meta(&text, &participants);
                let num = task_repo.next_num(&list.id).await?;
                let task = Task::new(list.id.clone(), num, text, meta);
                task_repo.insert(&task).await?;
                format!(
                    "{sender} added task {num}: {}",
                    render::strip_markup(&task.text)
                )
            }
            Command::Delete(num) => {
                let Some(task) = task_repo.get(&list.id, num).await? else {
                    return Ok(InboxOutcome::NoSuchTask {
                        list_id: list.id,
                        num,
                    });
                };
                task_repo.remove(&list.id, num).await?;
                format!(
                    "{sender} removed task {num}: {}",
                    render::strip_markup(&task.text)
                )
            }
            Command::Done(num) => {
                if !task_repo.set_done(&list.id, num, true).await? {
                    return Ok(InboxOutcome::NoSuchTask {
                        list_id: list.id,
                        num,
                    });
                }
                format!("{sender} marked task {num} as done.")
            }
            Command::Reset(num) => {
                if !task_repo.set_done(&list.id, num, false).await? {
                    return Ok(InboxOutcome::NoSuchTask {
                        list_id: list.id,
                        num,
                    });
                }
                format!("{sender} reopened task {num}.")
            }
            Command::Comment(text) => {
                if text.is_empty() {
                    format!("{sender} replied with an empty message.")
                } else {
                    format!("{sender} commented: {text}")
                }
            }
        };

        // Record the sender's latest message ID, adding them as a
        // participant if they were not one yet.
        let sender_entry = Participant::new(
            list.id.clone(),
            email.from.address.clone(),
            email.from.name.clone(),
            email.message_id.clone(),
        );
        participant_repo.upsert(&sender_entry).await?;
        list_repo.touch(&list.id).await?;

        let participants = participant_repo.list_for(&list.id).await?;
        let tasks = task_repo.list_for(&list.id).await?;

        info!(list_id = %list.id, "list updated");

        self.notify_participants(&list, &tasks, &participants, &event)
            .await;

        Ok(InboxOutcome::Updated { list_id: list.id })
    }

    /// Fan out one tailored notification per participant.
    ///
    /// Delivery problems are logged and swallowed; a failed notification
    /// must never fail the webhook response.
    async fn notify_participants(
        &self,
        list: &TodoList,
        tasks: &[Task],
        participants: &[Participant],
        event: &str,
    ) {
        let Some(ref mailer) = self.mailer else {
            return;
        };

        let subject = render::notification_subject(list);
        for participant in participants {
            let body = render::render_notification(list, tasks, &participant.email, event);
            let message = OutgoingMessage {
                to: participant.email.clone(),
                subject: subject.clone(),
                body,
            };
            if let Err(err) = mailer.enqueue(message).await {
                warn!(to = %participant.email, %err, "failed to enqueue notification");
            }
        }
    }

    fn is_service_address(&self, address: &str) -> bool {
        address == self.config.inbound.create_address
            || address == self.config.inbound.update_address
    }
}

/// Human-readable sender label: display name when present, else address.
fn sender_display(email: &InboundEmail) -> &str {
    if email.from.name.is_empty() {
        &email.from.address
    } else {
        &email.from.name
    }
}
