//! helpdesk-core - Ticket lifecycle and access-control core for a support desk
//!
//! This crate implements the business rules of a support-ticket backend:
//! - Ordered roles and uniform access predicates
//! - Ticket state machine with message-driven status transitions
//! - Internal/external message visibility with an author edit window
//! - Derived notifications for ticket and message mutations
//! - Access-scoped listing, search, pagination, and statistics
//!
//! The surrounding service owns HTTP routing, authentication, and delivery;
//! this crate only authorizes and mutates entities loaded through the
//! storage contract in [`storage`].

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_closure_for_method_calls)]

//! # Example
//!
//! ```rust,ignore
//! use helpdesk_core::config::HelpdeskConfig;
//! use helpdesk_core::services::{NewTicket, TicketService};
//! use helpdesk_core::storage::FileStorage;
//!
//! let storage = FileStorage::new(".helpdesk");
//! let config = HelpdeskConfig::default();
//! let tickets = TicketService::new(&storage, &config);
//!
//! // `owner` is the authenticated actor record supplied by the caller
//! let ticket = tickets.create(&owner, NewTicket {
//!     category: category_id,
//!     title: "Cannot log in".into(),
//!     description: "Login times out since this morning".into(),
//!     priority: Default::default(),
//! })?;
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HelpdeskError, Result};
