//! Core domain entities
//!
//! Roles, users, categories, tickets, messages, and notifications, together
//! with the access predicates that gate every mutation. Entities are plain
//! data with one-directional foreign keys; related records are always passed
//! in explicitly by the caller.

mod builders;
mod category;
mod message;
mod notification;
mod role;
mod ticket;
mod user;

pub use builders::{MessageBuilder, TicketBuilder};
pub use category::{Category, CategoryId, CategorySeed, DEFAULT_CATEGORIES};
pub use message::{Attachment, Message, MessageId};
pub use notification::{Notification, NotificationId, NotificationType};
pub use role::Role;
pub use ticket::{Priority, Status, Ticket, TicketId};
pub use user::{User, UserId};
