//! Ticket entity and lifecycle
//!
//! A ticket is created `Open` by its owner and moves through
//! `InProgress`/`WaitingResponse` as the conversation goes back and forth,
//! until it is resolved or closed. `Closed` is terminal except for an
//! explicit staff reopen. The access predicates here take the acting user
//! explicitly; they never reach through hidden relations.

use super::{CategoryId, Role, User, UserId};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
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

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket lifecycle status
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Newly filed, nobody working on it yet
    #[default]
    Open,
    /// Staff is working on the ticket
    InProgress,
    /// Waiting for the ticket owner to respond
    WaitingResponse,
    /// Answered to the owner's satisfaction
    Resolved,
    /// Closed; terminal except for explicit reopen
    Closed,
}

impl Status {
    /// All statuses in lifecycle order
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::WaitingResponse,
        Self::Resolved,
        Self::Closed,
    ];

    /// Whether the ticket still counts as active
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress | Self::WaitingResponse)
    }

    /// Human-readable status name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::WaitingResponse => "Waiting for response",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// UI color for the status badge
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Open => "#FF6B6B",
            Self::InProgress => "#4ECDC4",
            Self::WaitingResponse => "#FECA57",
            Self::Resolved => "#96CEB4",
            Self::Closed => "#B8B8B8",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Status {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "waiting_response" => Ok(Self::WaitingResponse),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(HelpdeskError::validation(format!("Unknown status: '{s}'"))),
        }
    }
}

/// Ticket priority with an ordinal weight used as a sort tie-break
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    /// All priorities in ascending order of urgency
    pub const ALL: [Self; 4] = [Self::Low, Self::Normal, Self::High, Self::Critical];

    /// Numeric weight, higher sorts first
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Normal => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Human-readable priority name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// UI color for the priority badge
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#96CEB4",
            Self::Normal => "#45B7D1",
            Self::High => "#FECA57",
            Self::Critical => "#FF6B6B",
        }
    }

    /// Emoji marker shown in display titles
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Low => "🔵",
            Self::Normal => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Priority {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(HelpdeskError::validation(format!(
                "Unknown priority: '{s}'"
            ))),
        }
    }
}

/// A support ticket
///
/// The owner is immutable after creation. `closed_at` is set exactly when the
/// status is [`Status::Closed`]; [`Ticket::close`] and [`Ticket::reopen`]
/// keep that pairing intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    /// Author of the ticket, never changes
    pub owner: UserId,
    /// Staff member currently handling the ticket
    pub assignee: Option<UserId>,
    pub category: CategoryId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a new open ticket owned by `owner`
    pub fn new(
        owner: UserId,
        category: CategoryId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            owner,
            assignee: None,
            category,
            title: title.into(),
            description: description.into(),
            status: Status::Open,
            priority,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// Whether the ticket is still active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether a staff member is assigned
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }

    /// Title prefixed with the priority marker
    #[must_use]
    pub fn display_title(&self) -> String {
        format!("{} {}", self.priority.icon(), self.title)
    }

    /// Description truncated to 100 characters
    #[must_use]
    pub fn short_description(&self) -> String {
        if self.description.chars().count() <= 100 {
            self.description.clone()
        } else {
            let head: String = self.description.chars().take(97).collect();
            format!("{head}...")
        }
    }

    /// Whether `user` may view this ticket
    ///
    /// Owner, assignee, and staff may view.
    #[must_use]
    pub fn can_be_viewed_by(&self, user: &User) -> bool {
        if self.owner == user.id {
            return true;
        }
        if self.assignee == Some(user.id) {
            return true;
        }
        user.role.can_access(Role::Helper)
    }

    /// Whether `user` may edit this ticket
    ///
    /// The owner may edit only while the ticket is open; the assignee may
    /// always edit; moderators and above may edit anything.
    #[must_use]
    pub fn can_be_edited_by(&self, user: &User) -> bool {
        if self.owner == user.id && self.status == Status::Open {
            return true;
        }
        if self.assignee == Some(user.id) {
            return true;
        }
        user.role.can_access(Role::Moderator)
    }

    /// Whether the ticket may be assigned to `candidate`
    #[must_use]
    pub fn can_be_assigned_to(&self, candidate: &User) -> bool {
        candidate.is_active && candidate.role.can_access(Role::Helper)
    }

    /// Transition to `Closed` and stamp `closed_at`
    ///
    /// No-op when already closed so the operation stays idempotent.
    pub fn close(&mut self, now: DateTime<Utc>) {
        if self.status == Status::Closed {
            return;
        }
        self.status = Status::Closed;
        self.closed_at = Some(now);
        self.updated_at = now;
    }

    /// Reset to `Open` and clear `closed_at`, regardless of prior state
    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.status = Status::Open;
        self.closed_at = None;
        self.updated_at = now;
    }

    /// Bump the updated timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket #{} - {} ({})", self.id, self.title, self.status)
    }
}
