use crate::core::{
    Category, CategoryId, Message, MessageId, Notification, NotificationId, Ticket, TicketId,
    User, UserId,
};
use crate::error::{HelpdeskError, Result};

/// Repository trait for ticket storage operations
///
/// This trait defines the persistence contract for tickets, allowing for
/// different storage implementations behind the services.
pub trait TicketRepository: Send + Sync {
    /// Saves a ticket to the repository
    fn save_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load_ticket(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets
    fn load_all_tickets(&self) -> Result<Vec<Ticket>>;

    /// Deletes a ticket by ID
    fn delete_ticket(&self, id: &TicketId) -> Result<()>;

    /// Checks if a ticket exists by ID
    fn ticket_exists(&self, id: &TicketId) -> Result<bool> {
        match self.load_ticket(id) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Finds tickets matching a predicate
    fn find_tickets<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
        Self: Sized,
    {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.into_iter().filter(predicate).collect())
    }

    /// Counts tickets matching a predicate
    fn count_tickets<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Ticket) -> bool,
        Self: Sized,
    {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.iter().filter(|t| predicate(t)).count())
    }
}

/// Repository trait for message storage operations
pub trait MessageRepository: Send + Sync {
    /// Saves a message to the repository
    fn save_message(&self, message: &Message) -> Result<()>;

    /// Loads a message by ID
    fn load_message(&self, id: &MessageId) -> Result<Message>;

    /// Loads all messages
    fn load_all_messages(&self) -> Result<Vec<Message>>;

    /// Deletes a message by ID
    fn delete_message(&self, id: &MessageId) -> Result<()>;

    /// Loads a ticket's messages in thread order (ascending creation time)
    fn load_ticket_messages(&self, ticket_id: &TicketId) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .load_all_messages()?
            .into_iter()
            .filter(|m| m.ticket_id == *ticket_id)
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}

/// Repository trait for category storage operations
pub trait CategoryRepository: Send + Sync {
    /// Saves a category to the repository
    fn save_category(&self, category: &Category) -> Result<()>;

    /// Loads a category by ID
    fn load_category(&self, id: &CategoryId) -> Result<Category>;

    /// Loads all categories
    fn load_all_categories(&self) -> Result<Vec<Category>>;

    /// Finds a category by its unique name
    fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .load_all_categories()?
            .into_iter()
            .find(|c| c.name == name))
    }
}

/// Repository trait for user lookups
///
/// The core treats users as read-mostly identity records; saving exists for
/// the callers that own user provisioning.
pub trait UserRepository: Send + Sync {
    /// Saves a user record
    fn save_user(&self, user: &User) -> Result<()>;

    /// Loads a user by ID
    fn load_user(&self, id: &UserId) -> Result<User>;

    /// Loads all users
    fn load_all_users(&self) -> Result<Vec<User>>;

    /// Finds users matching a predicate
    fn find_users<F>(&self, predicate: F) -> Result<Vec<User>>
    where
        F: Fn(&User) -> bool,
        Self: Sized,
    {
        let users = self.load_all_users()?;
        Ok(users.into_iter().filter(predicate).collect())
    }
}

/// Repository trait for notification storage operations
pub trait NotificationRepository: Send + Sync {
    /// Saves a notification to the repository
    fn save_notification(&self, notification: &Notification) -> Result<()>;

    /// Loads a notification by ID
    fn load_notification(&self, id: &NotificationId) -> Result<Notification>;

    /// Loads all notifications
    fn load_all_notifications(&self) -> Result<Vec<Notification>>;

    /// Deletes a notification by ID
    fn delete_notification(&self, id: &NotificationId) -> Result<()>;

    /// Loads all notifications addressed to one user
    fn load_user_notifications(&self, recipient: &UserId) -> Result<Vec<Notification>> {
        Ok(self
            .load_all_notifications()?
            .into_iter()
            .filter(|n| n.recipient == *recipient)
            .collect())
    }
}

/// Combined storage trait the services are generic over
pub trait Storage:
    TicketRepository + MessageRepository + CategoryRepository + UserRepository + NotificationRepository
{
}

/// Implementation of Storage for types that implement all repository traits
impl<T> Storage for T where
    T: TicketRepository
        + MessageRepository
        + CategoryRepository
        + UserRepository
        + NotificationRepository
{
}

use super::file::FileStorage;

impl TicketRepository for FileStorage {
    fn save_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.put_ticket(ticket)
    }

    fn load_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.get_ticket(&id.to_string())?
            .ok_or_else(|| HelpdeskError::TicketNotFound { id: id.to_string() })
    }

    fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        self.all_tickets()
    }

    fn delete_ticket(&self, id: &TicketId) -> Result<()> {
        if self.remove_ticket(&id.to_string())? {
            Ok(())
        } else {
            Err(HelpdeskError::TicketNotFound { id: id.to_string() })
        }
    }
}

impl MessageRepository for FileStorage {
    fn save_message(&self, message: &Message) -> Result<()> {
        self.put_message(message)
    }

    fn load_message(&self, id: &MessageId) -> Result<Message> {
        self.get_message(&id.to_string())?
            .ok_or_else(|| HelpdeskError::MessageNotFound { id: id.to_string() })
    }

    fn load_all_messages(&self) -> Result<Vec<Message>> {
        self.all_messages()
    }

    fn delete_message(&self, id: &MessageId) -> Result<()> {
        if self.remove_message(&id.to_string())? {
            Ok(())
        } else {
            Err(HelpdeskError::MessageNotFound { id: id.to_string() })
        }
    }
}

impl CategoryRepository for FileStorage {
    fn save_category(&self, category: &Category) -> Result<()> {
        self.put_category(category)
    }

    fn load_category(&self, id: &CategoryId) -> Result<Category> {
        self.get_category(&id.to_string())?
            .ok_or_else(|| HelpdeskError::CategoryNotFound { id: id.to_string() })
    }

    fn load_all_categories(&self) -> Result<Vec<Category>> {
        self.all_categories()
    }
}

impl UserRepository for FileStorage {
    fn save_user(&self, user: &User) -> Result<()> {
        self.put_user(user)
    }

    fn load_user(&self, id: &UserId) -> Result<User> {
        self.get_user(&id.to_string())?
            .ok_or_else(|| HelpdeskError::UserNotFound { id: id.to_string() })
    }

    fn load_all_users(&self) -> Result<Vec<User>> {
        self.all_users()
    }
}

impl NotificationRepository for FileStorage {
    fn save_notification(&self, notification: &Notification) -> Result<()> {
        self.put_notification(notification)
    }

    fn load_notification(&self, id: &NotificationId) -> Result<Notification> {
        self.get_notification(&id.to_string())?
            .ok_or_else(|| HelpdeskError::NotificationNotFound { id: id.to_string() })
    }

    fn load_all_notifications(&self) -> Result<Vec<Notification>> {
        self.all_notifications()
    }

    fn delete_notification(&self, id: &NotificationId) -> Result<()> {
        if self.remove_notification(&id.to_string())? {
            Ok(())
        } else {
            Err(HelpdeskError::NotificationNotFound { id: id.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CategoryId, Priority, Status, Ticket, UserId};
    use crate::storage::FileStorage;
    use tempfile::TempDir;

    fn create_test_ticket(title: &str) -> Ticket {
        Ticket::new(
            UserId::new(),
            CategoryId::new(),
            title,
            format!("Description for {title}"),
            Priority::Normal,
        )
    }

    fn test_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join(".helpdesk"));
        (temp_dir, storage)
    }

    #[test]
    fn test_ticket_repository_save_and_load() {
        let (_guard, storage) = test_storage();

        let ticket = create_test_ticket("test-save");
        let id = ticket.id;

        storage.save_ticket(&ticket).expect("Failed to save ticket");

        let loaded = storage.load_ticket(&id).expect("Failed to load ticket");
        assert_eq!(loaded.id, ticket.id);
        assert_eq!(loaded.title, ticket.title);
    }

    #[test]
    fn test_ticket_repository_load_all() {
        let (_guard, storage) = test_storage();

        for i in 0..3 {
            storage
                .save_ticket(&create_test_ticket(&format!("test-{i}")))
                .expect("Failed to save ticket");
        }

        let loaded = storage.load_all_tickets().expect("Failed to load all");
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_ticket_repository_delete() {
        let (_guard, storage) = test_storage();

        let ticket = create_test_ticket("test-delete");
        let id = ticket.id;

        storage.save_ticket(&ticket).expect("Failed to save ticket");
        assert!(storage.ticket_exists(&id).expect("Failed to check existence"));

        storage.delete_ticket(&id).expect("Failed to delete ticket");
        assert!(!storage.ticket_exists(&id).expect("Failed to check existence"));

        let err = storage.delete_ticket(&id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ticket_repository_find_and_count() {
        let (_guard, storage) = test_storage();

        let mut high_priority = create_test_ticket("high-priority");
        high_priority.priority = Priority::High;

        let mut closed = create_test_ticket("closed");
        closed.status = Status::Closed;

        storage.save_ticket(&high_priority).unwrap();
        storage.save_ticket(&closed).unwrap();

        let found = storage
            .find_tickets(|t| t.priority == Priority::High)
            .expect("Failed to find tickets");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "high-priority");

        let active = storage
            .count_tickets(|t| t.status.is_active())
            .expect("Failed to count tickets");
        assert_eq!(active, 1);
    }

    #[test]
    fn test_message_thread_order() {
        use crate::core::MessageBuilder;
        use chrono::{Duration, Utc};

        let (_guard, storage) = test_storage();
        let ticket = create_test_ticket("threaded");
        storage.save_ticket(&ticket).unwrap();

        let base = Utc::now();
        for offset in [2i64, 0, 1] {
            let message = MessageBuilder::new()
                .ticket_id(ticket.id)
                .content(format!("message {offset}"))
                .created_at(base + Duration::seconds(offset))
                .build();
            storage.save_message(&message).unwrap();
        }

        let thread = storage.load_ticket_messages(&ticket.id).unwrap();
        assert_eq!(thread.len(), 3);
        assert!(thread.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn test_category_find_by_name() {
        use crate::core::Category;

        let (_guard, storage) = test_storage();
        let category = Category::new("Billing", "💰", "#96CEB4");
        storage.save_category(&category).unwrap();

        let found = storage.find_category_by_name("Billing").unwrap();
        assert!(found.is_some());
        assert!(storage.find_category_by_name("Unknown").unwrap().is_none());
    }

    #[test]
    fn test_user_notifications_scope() {
        use crate::core::Notification;

        let (_guard, storage) = test_storage();
        let alice = UserId::new();
        let bob = UserId::new();

        storage
            .save_notification(&Notification::system(alice, "A", "for alice"))
            .unwrap();
        storage
            .save_notification(&Notification::system(bob, "B", "for bob"))
            .unwrap();

        let for_alice = storage.load_user_notifications(&alice).unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].title, "A");
    }
}
