//! Error types for helpdesk-core
//!
//! All fallible operations in this crate return [`Result`], an alias over
//! [`HelpdeskError`]. The taxonomy mirrors what callers need to map onto
//! user-facing responses: validation failures, permission failures,
//! assignment eligibility failures, and missing entities. Storage errors
//! (I/O, serialization) are wrapped and propagated unchanged.

use thiserror::Error;

/// Result type alias using `HelpdeskError`
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Errors produced by core operations and the bundled storage
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// Malformed or missing required fields, or an inactive category reference
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// The actor lacks the required role or ownership for the mutation
    #[error("Permission denied: {action}")]
    Permission { action: String },

    /// The assignment candidate is inactive or below the helper role
    #[error("Cannot assign ticket: {reason}")]
    InvalidAssignee { reason: String },

    /// Ticket id did not resolve
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Message id did not resolve
    #[error("Message not found: {id}")]
    MessageNotFound { id: String },

    /// Category id did not resolve
    #[error("Category not found: {id}")]
    CategoryNotFound { id: String },

    /// User id did not resolve
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// Notification id did not resolve
    #[error("Notification not found: {id}")]
    NotificationNotFound { id: String },

    /// Underlying I/O failure from the file store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failure from the file store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Catch-all for one-off error messages
    #[error("{0}")]
    Custom(String),
}

impl HelpdeskError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a permission error naming the denied action
    pub fn permission(action: impl Into<String>) -> Self {
        Self::Permission {
            action: action.into(),
        }
    }

    /// Create an assignment eligibility error
    pub fn invalid_assignee(reason: impl Into<String>) -> Self {
        Self::InvalidAssignee {
            reason: reason.into(),
        }
    }

    /// Whether this error is a not-found variant for any entity
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound { .. }
                | Self::MessageNotFound { .. }
                | Self::CategoryNotFound { .. }
                | Self::UserNotFound { .. }
                | Self::NotificationNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = HelpdeskError::TicketNotFound {
            id: "abc".to_string(),
        };
        assert!(err.is_not_found());

        let err = HelpdeskError::permission("close ticket");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = HelpdeskError::validation("title must not be empty");
        assert_eq!(err.to_string(), "Validation failed: title must not be empty");

        let err = HelpdeskError::invalid_assignee("candidate is inactive");
        assert_eq!(err.to_string(), "Cannot assign ticket: candidate is inactive");
    }
}
