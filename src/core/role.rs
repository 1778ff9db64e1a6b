//! Ordered permission roles
//!
//! Every access check in the crate goes through [`Role::can_access`]: the
//! holder's ordinal level must be at least the required level. There is no
//! role-specific special-casing anywhere else.

use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role, ordered from least to most privileged
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular user filing tickets
    #[default]
    User,
    /// Support staff answering tickets
    Helper,
    /// Staff with edit/delete authority over any ticket or message
    Moderator,
    /// Administrator managing categories and users
    Admin,
    /// Highest level, system management
    Developer,
}

impl Role {
    /// All roles in ascending order of privilege
    pub const ALL: [Self; 5] = [
        Self::User,
        Self::Helper,
        Self::Moderator,
        Self::Admin,
        Self::Developer,
    ];

    /// Numeric level used for access comparison
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::User => 1,
            Self::Helper => 2,
            Self::Moderator => 3,
            Self::Admin => 4,
            Self::Developer => 5,
        }
    }

    /// Whether this role can access functionality gated on `required`
    #[must_use]
    pub const fn can_access(self, required: Self) -> bool {
        self.level() >= required.level()
    }

    /// Staff means helper or above
    #[must_use]
    pub const fn is_staff(self) -> bool {
        self.can_access(Self::Helper)
    }

    /// Human-readable role name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Helper => "Helper",
            Self::Moderator => "Moderator",
            Self::Admin => "Admin",
            Self::Developer => "Developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Role {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "helper" => Ok(Self::Helper),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            "developer" => Ok(Self::Developer),
            _ => Err(HelpdeskError::validation(format!("Unknown role: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_strictly_ordered() {
        let levels: Vec<u8> = Role::ALL.iter().map(|r| r.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_can_access_matches_level_comparison() {
        for holder in Role::ALL {
            for required in Role::ALL {
                assert_eq!(
                    holder.can_access(required),
                    holder.level() >= required.level(),
                    "{holder} vs {required}"
                );
            }
        }
    }

    #[test]
    fn test_staff_threshold() {
        assert!(!Role::User.is_staff());
        assert!(Role::Helper.is_staff());
        assert!(Role::Developer.is_staff());
    }

    #[test]
    fn test_derived_ordering_agrees_with_levels() {
        assert!(Role::User < Role::Helper);
        assert!(Role::Moderator < Role::Admin);
        assert!(Role::Admin < Role::Developer);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("moderator".parse::<Role>().unwrap(), Role::Moderator);
        assert!("owner".parse::<Role>().is_err());
    }
}
