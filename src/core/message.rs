//! Ticket conversation messages
//!
//! Messages are immutable apart from the explicit edit path: the author may
//! rewrite content inside a short window, moderators at any time. Internal
//! messages are staff-only annotations the ticket owner never sees.

use super::{Role, Ticket, User, UserId};
use super::ticket::TicketId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
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

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File attached to a message
///
/// Embedded in the message record rather than stored as its own entity. The
/// upload itself is handled by an external collaborator; the core only keeps
/// the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
    /// URL the file can be fetched from
    pub url: String,
    /// Opaque reference into the external file store, when one exists
    pub file_ref: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Create an attachment descriptor
    pub fn new(
        filename: impl Into<String>,
        size: u64,
        content_type: impl Into<String>,
        url: impl Into<String>,
        file_ref: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            size,
            content_type: content_type.into(),
            url: url.into(),
            file_ref,
            uploaded_at: Utc::now(),
        }
    }

    /// Whether the MIME type is a common web image format
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(
            self.content_type.as_str(),
            "image/jpeg" | "image/png" | "image/gif" | "image/webp"
        )
    }

    /// Whether the MIME type is a common document format
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(
            self.content_type.as_str(),
            "application/pdf"
                | "application/msword"
                | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                | "text/plain"
        )
    }
}

/// A message in a ticket's conversation thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub ticket_id: TicketId,
    /// Author of the message
    pub author: UserId,
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Staff-only annotation, invisible to the ticket owner
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message attached to a ticket
    pub fn new(
        ticket_id: TicketId,
        author: UserId,
        content: impl Into<String>,
        attachments: Vec<Attachment>,
        is_internal: bool,
    ) -> Self {
        Self {
            id: MessageId::new(),
            ticket_id,
            author,
            content: content.into(),
            attachments,
            is_internal,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
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

    /// Image attachments only
    #[must_use]
    pub fn image_attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().filter(|a| a.is_image()).collect()
    }

    /// Document attachments only
    #[must_use]
    pub fn document_attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().filter(|a| a.is_document()).collect()
    }

    /// Whether `user` may view this message
    ///
    /// Internal messages require staff; everything else follows the parent
    /// ticket's view rule. The ticket is passed explicitly, the message does
    /// not reach back through a relation.
    #[must_use]
    pub fn can_be_viewed_by(&self, user: &User, ticket: &Ticket) -> bool {
        if self.is_internal && !user.role.can_access(Role::Helper) {
            return false;
        }
        ticket.can_be_viewed_by(user)
    }

    /// Whether `user` may edit this message at `now`
    ///
    /// The author may edit within `edit_window` of creation; moderators and
    /// above may edit at any time.
    #[must_use]
    pub fn can_be_edited_by(&self, user: &User, now: DateTime<Utc>, edit_window: Duration) -> bool {
        if self.author == user.id && now <= self.created_at + edit_window {
            return true;
        }
        user.role.can_access(Role::Moderator)
    }

    /// Whether `user` may delete this message
    #[must_use]
    pub fn can_be_deleted_by(&self, user: &User) -> bool {
        user.role.can_access(Role::Moderator)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_internal { "[Internal] " } else { "" };
        write!(f, "{prefix}Message from {}: {}", self.author, self.short_content())
    }
}
