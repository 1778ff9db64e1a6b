//! Ticket categories
//!
//! Categories classify tickets and never disappear while tickets reference
//! them: admins soft-disable a category (`is_active = false`) instead of
//! deleting it.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
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

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named classification tag for tickets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Unique name
    pub name: String,
    pub description: Option<String>,
    /// Emoji icon shown next to the name
    pub icon: String,
    /// HEX color, `#RRGGBB`
    pub color: String,
    pub is_active: bool,
    /// Lower sorts first
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create an active category
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: None,
            icon: icon.into(),
            color: color.into(),
            is_active: true,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Name with icon prefix
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category {}", self.display_name())
    }
}

/// Seed data for a default category
#[derive(Debug, Clone)]
pub struct CategorySeed {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub sort_order: i32,
}

/// Default category set offered to bootstrap callers
pub static DEFAULT_CATEGORIES: Lazy<Vec<CategorySeed>> = Lazy::new(|| {
    vec![
        CategorySeed {
            name: "Technical Issues",
            description: "Connection problems, errors, crashes",
            icon: "🔧",
            color: "#FF6B6B",
            sort_order: 1,
        },
        CategorySeed {
            name: "Bans & Appeals",
            description: "Account blocks, unban requests, appeals",
            icon: "⚖️",
            color: "#4ECDC4",
            sort_order: 2,
        },
        CategorySeed {
            name: "Gameplay Questions",
            description: "Help with features, commands, mechanics",
            icon: "🎮",
            color: "#45B7D1",
            sort_order: 3,
        },
        CategorySeed {
            name: "Payments & Perks",
            description: "Purchase problems, currency, privileges",
            icon: "💰",
            color: "#96CEB4",
            sort_order: 4,
        },
        CategorySeed {
            name: "Player Reports",
            description: "Rule violations, cheating, abusive behavior",
            icon: "🚨",
            color: "#FECA57",
            sort_order: 5,
        },
        CategorySeed {
            name: "Other",
            description: "Anything that does not fit the other categories",
            icon: "❓",
            color: "#B8B8B8",
            sort_order: 6,
        },
    ]
});
