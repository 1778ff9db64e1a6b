//! User lookups
//!
//! The core does not provision or authenticate users; it only resolves
//! identity records for assignment eligibility and notification fan-out.

use crate::core::{Role, User, UserId};
use crate::error::Result;
use crate::storage::Storage;

/// Read-only user lookups over the storage contract
pub struct UserService<'a, S: Storage> {
    store: &'a S,
}

impl<'a, S: Storage> UserService<'a, S> {
    /// Create a service over the given store
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load a user by id
    pub fn get(&self, id: &UserId) -> Result<User> {
        self.store.load_user(id)
    }

    /// All active staff members (helper and above)
    pub fn active_staff(&self) -> Result<Vec<User>> {
        self.store
            .find_users(|u| u.is_active && u.role.can_access(Role::Helper))
    }
}
