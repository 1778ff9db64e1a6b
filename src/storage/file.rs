//! YAML-backed file storage
//!
//! Reference implementation of the repository traits. Each entity kind lives
//! in its own subdirectory under the storage root, one YAML document per
//! record named `<id>.yaml`. Directories are created lazily on first write,
//! and reading a kind that was never written yields an empty list.

use crate::core::{Category, Message, Notification, Ticket, User};
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const TICKETS_DIR: &str = "tickets";
const MESSAGES_DIR: &str = "messages";
const CATEGORIES_DIR: &str = "categories";
const USERS_DIR: &str = "users";
const NOTIFICATIONS_DIR: &str = "notifications";

/// File-based storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage handle rooted at `root`
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: &str) -> PathBuf {
        self.root.join(kind)
    }

    fn doc_path(&self, kind: &str, id: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{id}.yaml"))
    }

    fn write_doc<T: Serialize>(&self, kind: &str, id: &str, value: &T) -> Result<()> {
        let dir = self.kind_dir(kind);
        fs::create_dir_all(&dir)?;
        let content = serde_yaml::to_string(value)?;
        fs::write(self.doc_path(kind, id), content)?;
        Ok(())
    }

    fn read_doc<T: DeserializeOwned>(&self, kind: &str, id: &str) -> Result<Option<T>> {
        let path = self.doc_path(kind, id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    fn read_all_docs<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>> {
        let dir = self.kind_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            records.push(serde_yaml::from_str(&content)?);
        }
        Ok(records)
    }

    /// Remove a document, reporting whether it existed
    fn remove_doc(&self, kind: &str, id: &str) -> Result<bool> {
        let path = self.doc_path(kind, id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

// Per-entity accessors used by the repository trait impls. Kept inherent so
// callers holding a concrete FileStorage can use them without trait imports.
impl FileStorage {
    pub(super) fn put_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.write_doc(TICKETS_DIR, &ticket.id.to_string(), ticket)
    }

    pub(super) fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        self.read_doc(TICKETS_DIR, id)
    }

    pub(super) fn all_tickets(&self) -> Result<Vec<Ticket>> {
        self.read_all_docs(TICKETS_DIR)
    }

    pub(super) fn remove_ticket(&self, id: &str) -> Result<bool> {
        self.remove_doc(TICKETS_DIR, id)
    }

    pub(super) fn put_message(&self, message: &Message) -> Result<()> {
        self.write_doc(MESSAGES_DIR, &message.id.to_string(), message)
    }

    pub(super) fn get_message(&self, id: &str) -> Result<Option<Message>> {
        self.read_doc(MESSAGES_DIR, id)
    }

    pub(super) fn all_messages(&self) -> Result<Vec<Message>> {
        self.read_all_docs(MESSAGES_DIR)
    }

    pub(super) fn remove_message(&self, id: &str) -> Result<bool> {
        self.remove_doc(MESSAGES_DIR, id)
    }

    pub(super) fn put_category(&self, category: &Category) -> Result<()> {
        self.write_doc(CATEGORIES_DIR, &category.id.to_string(), category)
    }

    pub(super) fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.read_doc(CATEGORIES_DIR, id)
    }

    pub(super) fn all_categories(&self) -> Result<Vec<Category>> {
        self.read_all_docs(CATEGORIES_DIR)
    }

    pub(super) fn put_user(&self, user: &User) -> Result<()> {
        self.write_doc(USERS_DIR, &user.id.to_string(), user)
    }

    pub(super) fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.read_doc(USERS_DIR, id)
    }

    pub(super) fn all_users(&self) -> Result<Vec<User>> {
        self.read_all_docs(USERS_DIR)
    }

    pub(super) fn put_notification(&self, notification: &Notification) -> Result<()> {
        self.write_doc(NOTIFICATIONS_DIR, &notification.id.to_string(), notification)
    }

    pub(super) fn get_notification(&self, id: &str) -> Result<Option<Notification>> {
        self.read_doc(NOTIFICATIONS_DIR, id)
    }

    pub(super) fn all_notifications(&self) -> Result<Vec<Notification>> {
        self.read_all_docs(NOTIFICATIONS_DIR)
    }

    pub(super) fn remove_notification(&self, id: &str) -> Result<bool> {
        self.remove_doc(NOTIFICATIONS_DIR, id)
    }
}
