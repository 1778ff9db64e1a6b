//! Persistence contract and the bundled file store
//!
//! Services are generic over [`Storage`]; the calling layer may substitute
//! any implementation that satisfies the repository traits. [`FileStorage`]
//! is the YAML-backed reference implementation used by the test suites.

mod file;
mod repository;

pub use file::FileStorage;
pub use repository::{
    CategoryRepository, MessageRepository, NotificationRepository, Storage, TicketRepository,
    UserRepository,
};
