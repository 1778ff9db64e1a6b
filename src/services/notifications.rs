//! Notification emission and recipient-facing operations
//!
//! Every ticket/message mutation that produces a notification goes through
//! the `notify_*` helpers here, inside the same logical transaction as the
//! mutation itself. Delivery (bot push, sockets) is an external
//! collaborator; this module only creates and manages the records.

use crate::core::{Notification, NotificationId, Status, Ticket, User};
use crate::error::{HelpdeskError, Result};
use crate::storage::Storage;
use tracing::debug;

/// Policy hook deciding which staff members receive the new-ticket fan-out
///
/// The calling layer may swap in category-based routing; the default accepts
/// every active staff member.
pub type FanoutPolicy = Box<dyn Fn(&Ticket, &User) -> bool + Send + Sync>;

/// Fan-out policy that notifies every candidate
#[must_use]
pub fn notify_all_staff() -> FanoutPolicy {
    Box::new(|_, _| true)
}

/// Operations on notifications
pub struct NotificationService<'a, S: Storage> {
    store: &'a S,
}

impl<'a, S: Storage> NotificationService<'a, S> {
    /// Create a service over the given store
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// List the viewer's notifications
    ///
    /// Unread entries come first, then higher type weight, then newest.
    pub fn list_for(&self, viewer: &User) -> Result<Vec<Notification>> {
        let mut notifications = self.store.load_user_notifications(&viewer.id)?;
        notifications.sort_by(|a, b| {
            a.is_read
                .cmp(&b.is_read)
                .then(b.kind.weight().cmp(&a.kind.weight()))
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(notifications)
    }

    /// Number of unread notifications for the viewer
    pub fn unread_count(&self, viewer: &User) -> Result<usize> {
        Ok(self
            .store
            .load_user_notifications(&viewer.id)?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    /// Mark one notification as read
    pub fn mark_read(&self, actor: &User, id: &NotificationId) -> Result<Notification> {
        let mut notification = self.store.load_notification(id)?;
        if !notification.can_be_viewed_by(actor) {
            return Err(HelpdeskError::permission("mark notification as read"));
        }
        notification.mark_as_read();
        self.store.save_notification(&notification)?;
        Ok(notification)
    }

    /// Mark all of the actor's notifications as read, returning the count
    pub fn mark_all_read(&self, actor: &User) -> Result<usize> {
        let mut updated = 0;
        for mut notification in self.store.load_user_notifications(&actor.id)? {
            if !notification.is_read {
                notification.mark_as_read();
                self.store.save_notification(&notification)?;
                updated += 1;
            }
        }
        Ok(updated)
    }

    /// Delete a notification
    ///
    /// Allowed for the recipient and for admins.
    pub fn delete(&self, actor: &User, id: &NotificationId) -> Result<()> {
        let notification = self.store.load_notification(id)?;
        if !notification.can_be_deleted_by(actor) {
            return Err(HelpdeskError::permission("delete notification"));
        }
        self.store.delete_notification(id)
    }

    /// Send a system notification to one user
    pub fn send_system(
        &self,
        recipient: &User,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Notification> {
        let notification = Notification::system(recipient.id, title, content);
        self.store.save_notification(&notification)?;
        Ok(notification)
    }

    /// Fan a new-ticket notification out to eligible staff
    pub(crate) fn notify_staff_new_ticket(
        &self,
        ticket: &Ticket,
        staff: &[User],
        policy: &FanoutPolicy,
    ) -> Result<usize> {
        let mut sent = 0;
        for member in staff {
            if member.id == ticket.owner || !policy(ticket, member) {
                continue;
            }
            let notification = Notification::new_ticket(member.id, ticket.id, &ticket.title);
            self.store.save_notification(&notification)?;
            sent += 1;
        }
        debug!("notified {sent} staff members about ticket {}", ticket.id);
        Ok(sent)
    }

    /// Notify the new assignee of a ticket
    pub(crate) fn notify_assigned(
        &self,
        ticket: &Ticket,
        assignee: &User,
        assigner: &User,
    ) -> Result<()> {
        let notification = Notification::ticket_assigned(
            assignee.id,
            ticket.id,
            &ticket.title,
            &assigner.display_name(),
        );
        self.store.save_notification(&notification)
    }

    /// Notify the owner (and a distinct assignee) about a status transition
    pub(crate) fn notify_status_changed(
        &self,
        ticket: &Ticket,
        old_status: Status,
        new_status: Status,
    ) -> Result<()> {
        let notification = Notification::status_changed(
            ticket.owner,
            ticket.id,
            &ticket.title,
            old_status.display_name(),
            new_status.display_name(),
        );
        self.store.save_notification(&notification)?;

        if let Some(assignee) = ticket.assignee {
            if assignee != ticket.owner {
                let notification = Notification::status_changed(
                    assignee,
                    ticket.id,
                    &ticket.title,
                    old_status.display_name(),
                    new_status.display_name(),
                );
                self.store.save_notification(&notification)?;
            }
        }
        Ok(())
    }

    /// Notify the other party about a new non-internal message
    ///
    /// Staff replies go to the owner; owner replies go to the assignee when
    /// one exists, otherwise nobody is singled out.
    pub(crate) fn notify_new_message(
        &self,
        ticket: &Ticket,
        author: &User,
        preview: &str,
    ) -> Result<()> {
        let recipient = if author.id == ticket.owner {
            match ticket.assignee {
                Some(assignee) if assignee != author.id => Some(assignee),
                _ => None,
            }
        } else {
            Some(ticket.owner)
        };

        if let Some(recipient) = recipient {
            let notification = Notification::new_message(
                recipient,
                ticket.id,
                &ticket.title,
                &author.display_name(),
                preview,
            );
            self.store.save_notification(&notification)?;
        }
        Ok(())
    }

    /// Notify the owner that their ticket was closed
    pub(crate) fn notify_ticket_closed(&self, ticket: &Ticket) -> Result<()> {
        let notification = Notification::ticket_closed(ticket.owner, ticket.id, &ticket.title);
        self.store.save_notification(&notification)
    }
}
