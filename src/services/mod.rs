//! Core operations over entities and storage
//!
//! Each service borrows the caller's storage handle so every mutation runs
//! inside whatever transaction boundary the caller supplies. Services hold
//! no state of their own beyond configuration and are cheap to construct
//! per request.

mod categories;
mod messages;
mod notifications;
mod tickets;
mod users;

pub use categories::{CategoryService, NewCategory};
pub use messages::{MessageService, NewMessage};
pub use notifications::{notify_all_staff, FanoutPolicy, NotificationService};
pub use tickets::{
    NewTicket, Page, PageParams, TicketFilter, TicketPatch, TicketService, TicketStatistics,
};
pub use users::UserService;
