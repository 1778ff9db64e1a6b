use super::{
    Attachment, CategoryId, Message, MessageId, Priority, Status, Ticket, TicketId, UserId,
};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    owner: Option<UserId>,
    assignee: Option<UserId>,
    category: Option<CategoryId>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub const fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the owner
    #[must_use]
    pub const fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the assignee
    #[must_use]
    pub const fn assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Set the category
    #[must_use]
    pub const fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `closed_at` timestamp
    #[must_use]
    pub const fn closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id.unwrap_or_else(TicketId::new),
            owner: self.owner.unwrap_or_else(UserId::new),
            assignee: self.assignee,
            category: self.category.unwrap_or_else(CategoryId::new),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            closed_at: self.closed_at,
        }
    }
}

/// Builder for creating Message instances
#[derive(Default)]
pub struct MessageBuilder {
    id: Option<MessageId>,
    ticket_id: Option<TicketId>,
    author: Option<UserId>,
    content: Option<String>,
    attachments: Vec<Attachment>,
    is_internal: bool,
    created_at: Option<DateTime<Utc>>,
}

impl MessageBuilder {
    /// Create a new message builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message ID
    #[must_use]
    pub const fn id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the parent ticket
    #[must_use]
    pub const fn ticket_id(mut self, ticket_id: TicketId) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    /// Set the author
    #[must_use]
    pub const fn author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the content
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add attachments
    #[must_use]
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Add a single attachment
    #[must_use]
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Mark the message as an internal staff note
    #[must_use]
    pub const fn internal(mut self, is_internal: bool) -> Self {
        self.is_internal = is_internal;
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the message
    pub fn build(self) -> Message {
        Message {
            id: self.id.unwrap_or_else(MessageId::new),
            ticket_id: self.ticket_id.unwrap_or_else(TicketId::new),
            author: self.author.unwrap_or_else(UserId::new),
            content: self.content.unwrap_or_default(),
            attachments: self.attachments,
            is_internal: self.is_internal,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
