//! User identity records
//!
//! The core never authenticates. A [`User`] is the authenticated actor record
//! handed in by the calling layer; the core only reads its role and active
//! flag for authorization decisions.

use super::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated actor record supplied by the external auth collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create an active user with the default role
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: None,
            username: None,
            role: Role::default(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Full name, "First Last" when a last name is present
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }

    /// Display name, preferring the @username handle
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("@{username}"),
            None => self.full_name(),
        }
    }

    /// Helper or above
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Whether this user may assign tickets to staff
    #[must_use]
    pub const fn can_assign_tickets(&self) -> bool {
        self.role.can_access(Role::Helper)
    }

    /// Whether this user may open the admin panel
    #[must_use]
    pub const fn can_access_admin_panel(&self) -> bool {
        self.role.can_access(Role::Moderator)
    }

    /// Whether this user may manage other users
    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        self.role.can_access(Role::Admin)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {} ({})", self.display_name(), self.role)
    }
}
