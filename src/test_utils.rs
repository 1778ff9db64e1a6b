//! Test utilities for helpdesk-core
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::config::HelpdeskConfig;
use crate::core::{Category, Priority, Role, Status, Ticket, User};
use crate::storage::{CategoryRepository, FileStorage, TicketRepository, UserRepository};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture wrapping a temporary data directory and a seeded store
pub struct TestProject {
    pub temp_dir: TempDir,
    pub data_dir: PathBuf,
    pub storage: FileStorage,
    pub config: HelpdeskConfig,
}

impl TestProject {
    /// Create a new test project with an empty store
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".helpdesk");
        let storage = FileStorage::new(data_dir.clone());
        let config = HelpdeskConfig::default();

        Self {
            temp_dir,
            data_dir,
            storage,
            config,
        }
    }

    /// Create a test project seeded with a category and one user per role
    pub fn with_seed_data() -> (Self, SeedUsers, Category) {
        let project = Self::new();

        let category = Category::new("Technical Issues", "🔧", "#FF6B6B");
        project
            .storage
            .save_category(&category)
            .expect("Failed to save category");

        let users = SeedUsers::new();
        for user in users.all() {
            project
                .storage
                .save_user(user)
                .expect("Failed to save user");
        }

        (project, users, category)
    }

    /// Create and save a ticket owned by `owner`
    pub fn create_ticket(&self, owner: &User, category: &Category, title: &str) -> Ticket {
        let ticket = create_test_ticket(owner, category, title, Priority::Normal, Status::Open);
        self.storage
            .save_ticket(&ticket)
            .expect("Failed to save ticket");
        ticket
    }
}

/// One user per role, all active
pub struct SeedUsers {
    pub user: User,
    pub helper: User,
    pub moderator: User,
    pub admin: User,
    pub developer: User,
}

impl SeedUsers {
    pub fn new() -> Self {
        Self {
            user: create_test_user("Plain User", Role::User),
            helper: create_test_user("Helpful Helper", Role::Helper),
            moderator: create_test_user("Mindful Moderator", Role::Moderator),
            admin: create_test_user("Able Admin", Role::Admin),
            developer: create_test_user("Daring Developer", Role::Developer),
        }
    }

    pub fn all(&self) -> [&User; 5] {
        [
            &self.user,
            &self.helper,
            &self.moderator,
            &self.admin,
            &self.developer,
        ]
    }
}

/// Create a test user with the given role
pub fn create_test_user(name: &str, role: Role) -> User {
    let mut user = User::new(name);
    user.role = role;
    user
}

/// Create a test ticket with default values
pub fn create_test_ticket(
    owner: &User,
    category: &Category,
    title: &str,
    priority: Priority,
    status: Status,
) -> Ticket {
    let mut ticket = Ticket::new(
        owner.id,
        category.id,
        title,
        format!("Description for {title}"),
        priority,
    );
    ticket.status = status;
    if status == Status::Closed {
        ticket.closed_at = Some(ticket.created_at);
    }
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.storage.load_all_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_seed_data() {
        let (project, users, category) = TestProject::with_seed_data();
        assert_eq!(project.storage.load_all_users().unwrap().len(), 5);
        assert!(users.helper.is_staff());
        assert!(category.is_active);

        let ticket = project.create_ticket(&users.user, &category, "Seeded");
        assert_eq!(
            project.storage.load_ticket(&ticket.id).unwrap().title,
            "Seeded"
        );
    }
}
