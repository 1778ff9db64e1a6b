//! Derived notifications
//!
//! Notifications are produced as a side effect of ticket and message
//! mutations and handed to an external delivery collaborator. The core only
//! creates the records, toggles their read flag, and deletes them.

use super::{Role, User, UserId};
use super::ticket::TicketId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generate a new random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of event a notification describes
///
/// Each type carries a fixed icon, display name, and a relative weight used
/// for client-side sorting, not for processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    NewTicket,
    TicketAssigned,
    TicketStatusChanged,
    NewMessage,
    TicketClosed,
    System,
}

impl NotificationType {
    /// Human-readable type name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NewTicket => "New ticket",
            Self::TicketAssigned => "Ticket assigned",
            Self::TicketStatusChanged => "Status changed",
            Self::NewMessage => "New message",
            Self::TicketClosed => "Ticket closed",
            Self::System => "System notification",
        }
    }

    /// Icon shown next to the title
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::NewTicket => "🎫",
            Self::TicketAssigned => "👤",
            Self::TicketStatusChanged => "🔄",
            Self::NewMessage => "💬",
            Self::TicketClosed => "✅",
            Self::System => "⚡",
        }
    }

    /// Sort weight, higher is more important
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::System => 5,
            Self::NewTicket | Self::TicketAssigned => 4,
            Self::NewMessage => 3,
            Self::TicketStatusChanged => 2,
            Self::TicketClosed => 1,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A notification addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    /// Recipient of the notification
    pub recipient: UserId,
    /// Related ticket, absent for system broadcasts
    pub ticket_id: Option<TicketId>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn build(
        recipient: UserId,
        ticket_id: Option<TicketId>,
        kind: NotificationType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            ticket_id,
            kind,
            title: title.into(),
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Notification for staff about a newly created ticket
    pub fn new_ticket(recipient: UserId, ticket_id: TicketId, ticket_title: &str) -> Self {
        Self::build(
            recipient,
            Some(ticket_id),
            NotificationType::NewTicket,
            "New support ticket",
            format!("A new ticket was created: {ticket_title}"),
        )
    }

    /// Notification for the staff member a ticket was assigned to
    pub fn ticket_assigned(
        recipient: UserId,
        ticket_id: TicketId,
        ticket_title: &str,
        assigner_name: &str,
    ) -> Self {
        Self::build(
            recipient,
            Some(ticket_id),
            NotificationType::TicketAssigned,
            "Ticket assigned to you",
            format!("You were assigned ticket '{ticket_title}' by {assigner_name}"),
        )
    }

    /// Notification about a new reply in a ticket
    pub fn new_message(
        recipient: UserId,
        ticket_id: TicketId,
        ticket_title: &str,
        sender_name: &str,
        preview: &str,
    ) -> Self {
        Self::build(
            recipient,
            Some(ticket_id),
            NotificationType::NewMessage,
            "New message in ticket",
            format!("{sender_name} replied in ticket '{ticket_title}': {preview}"),
        )
    }

    /// Notification about a status transition
    pub fn status_changed(
        recipient: UserId,
        ticket_id: TicketId,
        ticket_title: &str,
        old_status: &str,
        new_status: &str,
    ) -> Self {
        Self::build(
            recipient,
            Some(ticket_id),
            NotificationType::TicketStatusChanged,
            "Ticket status changed",
            format!("Ticket '{ticket_title}' moved from '{old_status}' to '{new_status}'"),
        )
    }

    /// Notification for the owner of a closed ticket
    pub fn ticket_closed(recipient: UserId, ticket_id: TicketId, ticket_title: &str) -> Self {
        Self::build(
            recipient,
            Some(ticket_id),
            NotificationType::TicketClosed,
            "Ticket closed",
            format!("Your ticket '{ticket_title}' was closed"),
        )
    }

    /// Free-form system notification without a ticket reference
    pub fn system(recipient: UserId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::build(recipient, None, NotificationType::System, title, content)
    }

    /// Title prefixed with the type icon
    #[must_use]
    pub fn display_title(&self) -> String {
        format!("{} {}", self.kind.icon(), self.title)
    }

    /// Content truncated to 100 characters
    #[must_use]
    pub fn short_content(&self) -> String {
        if self.content.chars().count() <= 100 {
            self.content.clone()
        } else {
            let head: String = self.content.chars().take(97).collect();
            format!("{head}...")
        }
    }

    /// Mark the notification as read
    pub fn mark_as_read(&mut self) {
        self.is_read = true;
    }

    /// Only the recipient may view their notifications
    #[must_use]
    pub fn can_be_viewed_by(&self, user: &User) -> bool {
        self.recipient == user.id
    }

    /// The recipient or an admin may delete
    #[must_use]
    pub fn can_be_deleted_by(&self, user: &User) -> bool {
        if self.recipient == user.id {
            return true;
        }
        user.role.can_access(Role::Admin)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification {} for user {}", self.kind, self.recipient)
    }
}
