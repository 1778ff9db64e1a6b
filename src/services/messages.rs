//! Message thread operations
//!
//! Posting a message is always allowed for anyone who can view the ticket;
//! visibility of internal notes is enforced at enumeration time instead.
//! Each post applies at most one status transition to the parent ticket.

use super::notifications::NotificationService;
use crate::config::HelpdeskConfig;
use crate::core::{Attachment, Message, MessageId, Status, Ticket, TicketId, User};
use crate::error::{HelpdeskError, Result};
use crate::storage::Storage;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Data for posting a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMessage {
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Request to mark the message as an internal staff note; silently
    /// downgraded for non-staff authors
    pub internal: bool,
}

/// The single status transition a new message may trigger
///
/// Conditions are checked in order; the first match wins.
fn transition_on_message(ticket: &Ticket, author: &User) -> Option<Status> {
    if ticket.status == Status::Closed {
        return None;
    }
    if author.id == ticket.owner && ticket.status == Status::WaitingResponse {
        return Some(Status::InProgress);
    }
    if author.is_staff() && author.id != ticket.owner {
        match ticket.status {
            Status::Open => return Some(Status::InProgress),
            Status::InProgress => return Some(Status::WaitingResponse),
            _ => {},
        }
    }
    None
}

/// Operations on ticket messages
pub struct MessageService<'a, S: Storage> {
    store: &'a S,
    config: &'a HelpdeskConfig,
}

impl<'a, S: Storage> MessageService<'a, S> {
    /// Create a service over the given store
    pub const fn new(store: &'a S, config: &'a HelpdeskConfig) -> Self {
        Self { store, config }
    }

    fn notifications(&self) -> NotificationService<'a, S> {
        NotificationService::new(self.store)
    }

    /// Post a message to a ticket
    ///
    /// Applies the message-driven status transition to the ticket and emits
    /// a new-message notification for non-internal messages.
    pub fn post(&self, author: &User, ticket_id: &TicketId, draft: NewMessage) -> Result<Message> {
        let mut ticket = self.store.load_ticket(ticket_id)?;
        if !ticket.can_be_viewed_by(author) {
            return Err(HelpdeskError::permission("post message"));
        }
        if draft.content.trim().is_empty() {
            return Err(HelpdeskError::validation("Message must not be empty"));
        }

        let is_internal = draft.internal && author.is_staff();
        let message = Message::new(
            ticket.id,
            author.id,
            draft.content,
            draft.attachments,
            is_internal,
        );
        self.store.save_message(&message)?;

        if let Some(next) = transition_on_message(&ticket, author) {
            debug!(
                "ticket {} moved from {} to {} on new message",
                ticket.id, ticket.status, next
            );
            ticket.status = next;
        }
        ticket.touch(Utc::now());
        self.store.save_ticket(&ticket)?;

        if !is_internal {
            self.notifications()
                .notify_new_message(&ticket, author, &message.short_content())?;
        }

        Ok(message)
    }

    /// List a ticket's messages in thread order
    ///
    /// When `include_internal` is unset it defaults to whether the viewer is
    /// staff; non-staff viewers never see internal notes either way.
    pub fn list(
        &self,
        viewer: &User,
        ticket_id: &TicketId,
        include_internal: Option<bool>,
    ) -> Result<Vec<Message>> {
        let ticket = self.store.load_ticket(ticket_id)?;
        if !ticket.can_be_viewed_by(viewer) {
            return Err(HelpdeskError::permission("view ticket messages"));
        }

        let include_internal = viewer.is_staff() && include_internal.unwrap_or(true);
        let mut messages = self.store.load_ticket_messages(ticket_id)?;
        if !include_internal {
            messages.retain(|m| !m.is_internal);
        }
        Ok(messages)
    }

    /// Replace a message's content
    ///
    /// The author may edit within the configured window; moderators and
    /// above may edit at any time.
    pub fn edit(
        &self,
        actor: &User,
        id: &MessageId,
        new_content: impl Into<String>,
    ) -> Result<Message> {
        let mut message = self.store.load_message(id)?;
        if !message.can_be_edited_by(actor, Utc::now(), self.config.edit_window()) {
            return Err(HelpdeskError::permission("edit message"));
        }

        let new_content = new_content.into();
        if new_content.trim().is_empty() {
            return Err(HelpdeskError::validation("Message must not be empty"));
        }

        message.content = new_content;
        self.store.save_message(&message)?;
        debug!("message {} edited by {}", message.id, actor.id);
        Ok(message)
    }

    /// Delete a message, moderators and above only
    pub fn delete(&self, actor: &User, id: &MessageId) -> Result<()> {
        let message = self.store.load_message(id)?;
        if !message.can_be_deleted_by(actor) {
            return Err(HelpdeskError::permission("delete message"));
        }
        self.store.delete_message(id)?;
        debug!("message {} deleted by {}", id, actor.id);
        Ok(())
    }
}
