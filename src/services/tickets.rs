//! Ticket operations
//!
//! Creation, updates, assignment, close/reopen, and the access-scoped
//! query engine. Every mutation checks the access predicates on the entity
//! before touching state and emits its notifications through
//! [`NotificationService`] so the caller can commit everything in one
//! transaction.

use super::notifications::{notify_all_staff, FanoutPolicy, NotificationService};
use crate::config::HelpdeskConfig;
use crate::core::{CategoryId, Priority, Role, Status, Ticket, TicketId, User, UserId};
use crate::error::{HelpdeskError, Result};
use crate::storage::Storage;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum accepted title length, in characters
const MAX_TITLE_LEN: usize = 500;

/// Data for creating a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    pub category: CategoryId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Partial update applied to a ticket
///
/// Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

/// Filter arguments for the ticket listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<CategoryId>,
    pub owner: Option<UserId>,
    pub assignee: Option<UserId>,
    /// Case-insensitive substring match against title and description
    pub search: Option<String>,
}

impl TicketFilter {
    /// Check if a ticket matches all filter criteria
    fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if ticket.priority != priority {
                return false;
            }
        }

        if let Some(category) = self.category {
            if ticket.category != category {
                return false;
            }
        }

        if let Some(owner) = self.owner {
            if ticket.owner != owner {
                return false;
            }
        }

        if let Some(assignee) = self.assignee {
            if ticket.assignee != Some(assignee) {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let in_title = ticket.title.to_lowercase().contains(&needle);
            let in_description = ticket.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        true
    }
}

/// Pagination arguments
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub skip: usize,
    /// Falls back to the configured default when unset
    pub limit: Option<usize>,
}

/// One page of results with the overall total
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Counts grouped by status and priority
#[derive(Debug, Clone, Serialize)]
pub struct TicketStatistics {
    pub total: usize,
    pub by_status: BTreeMap<Status, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

/// Operations on tickets
pub struct TicketService<'a, S: Storage> {
    store: &'a S,
    config: &'a HelpdeskConfig,
    fanout: FanoutPolicy,
}

impl<'a, S: Storage> TicketService<'a, S> {
    /// Create a service with the default staff fan-out policy
    pub fn new(store: &'a S, config: &'a HelpdeskConfig) -> Self {
        Self {
            store,
            config,
            fanout: notify_all_staff(),
        }
    }

    /// Replace the new-ticket fan-out policy
    #[must_use]
    pub fn with_fanout_policy(mut self, policy: FanoutPolicy) -> Self {
        self.fanout = policy;
        self
    }

    fn notifications(&self) -> NotificationService<'a, S> {
        NotificationService::new(self.store)
    }

    /// Resolve a category reference for ticket creation or re-categorization
    ///
    /// Missing and inactive categories are both reported as validation
    /// failures so the caller can surface one consistent message.
    fn require_active_category(&self, id: &CategoryId) -> Result<()> {
        match self.store.load_category(id) {
            Ok(category) if category.is_active => Ok(()),
            Ok(_) => Err(HelpdeskError::validation(
                "The selected category is not active",
            )),
            Err(e) if e.is_not_found() => Err(HelpdeskError::validation(
                "The selected category does not exist",
            )),
            Err(e) => Err(e),
        }
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(HelpdeskError::validation("Title must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(HelpdeskError::validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Create a new open ticket owned by `owner`
    pub fn create(&self, owner: &User, new: NewTicket) -> Result<Ticket> {
        Self::validate_title(&new.title)?;
        if new.description.trim().is_empty() {
            return Err(HelpdeskError::validation("Description must not be empty"));
        }
        self.require_active_category(&new.category)?;

        let ticket = Ticket::new(
            owner.id,
            new.category,
            new.title,
            new.description,
            new.priority,
        );
        self.store.save_ticket(&ticket)?;
        debug!("created ticket {} for user {}", ticket.id, owner.id);

        let staff = self
            .store
            .find_users(|u| u.is_active && u.role.can_access(Role::Helper))?;
        self.notifications()
            .notify_staff_new_ticket(&ticket, &staff, &self.fanout)?;

        Ok(ticket)
    }

    /// Load a ticket, enforcing the view rule
    pub fn get(&self, viewer: &User, id: &TicketId) -> Result<Ticket> {
        let ticket = self.store.load_ticket(id)?;
        if !ticket.can_be_viewed_by(viewer) {
            return Err(HelpdeskError::permission("view ticket"));
        }
        Ok(ticket)
    }

    /// Apply a partial update to a ticket
    ///
    /// Leaving `Closed` through a plain status patch is rejected; callers
    /// use [`TicketService::reopen`] for that, which keeps `closed_at`
    /// paired with the status at all times.
    pub fn update(&self, actor: &User, id: &TicketId, patch: TicketPatch) -> Result<Ticket> {
        let mut ticket = self.store.load_ticket(id)?;
        if !ticket.can_be_edited_by(actor) {
            return Err(HelpdeskError::permission("edit ticket"));
        }

        if let Some(new_status) = patch.status {
            if ticket.status == Status::Closed && new_status != Status::Closed {
                return Err(HelpdeskError::validation(
                    "A closed ticket can only be reopened explicitly",
                ));
            }
        }

        if let Some(ref title) = patch.title {
            Self::validate_title(title)?;
        }
        if let Some(ref category) = patch.category {
            self.require_active_category(category)?;
        }

        let now = Utc::now();
        let old_status = ticket.status;

        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        if let Some(category) = patch.category {
            ticket.category = category;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        if let Some(status) = patch.status {
            if status == Status::Closed {
                ticket.close(now);
            } else {
                ticket.status = status;
            }
        }
        ticket.touch(now);
        self.store.save_ticket(&ticket)?;

        if ticket.status != old_status {
            debug!(
                "ticket {} moved from {} to {}",
                ticket.id, old_status, ticket.status
            );
            self.notifications()
                .notify_status_changed(&ticket, old_status, ticket.status)?;
        }

        Ok(ticket)
    }

    /// Assign the ticket to a staff member, or clear the assignment
    ///
    /// Assigning onto an open ticket advances it to `InProgress`;
    /// unassigning never reverts the status.
    pub fn assign(
        &self,
        actor: &User,
        id: &TicketId,
        candidate: Option<&User>,
    ) -> Result<Ticket> {
        if !actor.can_assign_tickets() {
            return Err(HelpdeskError::permission("assign ticket"));
        }

        let mut ticket = self.store.load_ticket(id)?;
        match candidate {
            Some(candidate) => {
                if !ticket.can_be_assigned_to(candidate) {
                    return Err(HelpdeskError::invalid_assignee(format!(
                        "{} is not an active staff member",
                        candidate.display_name()
                    )));
                }
                ticket.assignee = Some(candidate.id);
                if ticket.status == Status::Open {
                    ticket.status = Status::InProgress;
                }
                ticket.touch(Utc::now());
                self.store.save_ticket(&ticket)?;
                debug!("ticket {} assigned to {}", ticket.id, candidate.id);
                self.notifications()
                    .notify_assigned(&ticket, candidate, actor)?;
            },
            None => {
                ticket.assignee = None;
                ticket.touch(Utc::now());
                self.store.save_ticket(&ticket)?;
                debug!("ticket {} unassigned", ticket.id);
            },
        }

        Ok(ticket)
    }

    /// Close a ticket
    ///
    /// A no-op when the ticket is already closed.
    pub fn close(&self, actor: &User, id: &TicketId) -> Result<Ticket> {
        let mut ticket = self.store.load_ticket(id)?;
        if !ticket.can_be_edited_by(actor) {
            return Err(HelpdeskError::permission("close ticket"));
        }

        if ticket.status == Status::Closed {
            return Ok(ticket);
        }

        ticket.close(Utc::now());
        self.store.save_ticket(&ticket)?;
        debug!("ticket {} closed by {}", ticket.id, actor.id);
        self.notifications().notify_ticket_closed(&ticket)?;

        Ok(ticket)
    }

    /// Reopen a ticket, staff only
    ///
    /// Resets to `Open` and clears `closed_at` regardless of the prior
    /// terminal state.
    pub fn reopen(&self, actor: &User, id: &TicketId) -> Result<Ticket> {
        if !actor.role.can_access(Role::Helper) {
            return Err(HelpdeskError::permission("reopen ticket"));
        }

        let mut ticket = self.store.load_ticket(id)?;
        let old_status = ticket.status;
        ticket.reopen(Utc::now());
        self.store.save_ticket(&ticket)?;
        debug!("ticket {} reopened by {}", ticket.id, actor.id);

        if old_status != Status::Open {
            self.notifications()
                .notify_status_changed(&ticket, old_status, Status::Open)?;
        }

        Ok(ticket)
    }

    /// Restrict a filter to what the viewer is allowed to see
    ///
    /// Plain users are pinned to their own tickets; their owner/assignee
    /// filter arguments are ignored. Staff filters pass through as given.
    fn scope_filter(viewer: &User, mut filter: TicketFilter) -> TicketFilter {
        if viewer.role == Role::User {
            filter.owner = Some(viewer.id);
            filter.assignee = None;
        }
        filter
    }

    /// List tickets with filters, access scoping, and pagination
    ///
    /// Sorted by priority descending, then creation time descending.
    pub fn list(
        &self,
        viewer: &User,
        filter: TicketFilter,
        page: PageParams,
    ) -> Result<Page<Ticket>> {
        let filter = Self::scope_filter(viewer, filter);
        let mut tickets = self.store.find_tickets(|t| filter.matches(t))?;
        tickets.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.created_at.cmp(&a.created_at))
        });

        Ok(Self::paginate(tickets, page, self.config))
    }

    /// The viewer's own tickets, newest first
    pub fn user_tickets(
        &self,
        user: &User,
        status: Option<Status>,
        page: PageParams,
    ) -> Result<Page<Ticket>> {
        let mut tickets = self
            .store
            .find_tickets(|t| t.owner == user.id && status.is_none_or(|s| t.status == s))?;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(Self::paginate(tickets, page, self.config))
    }

    /// Tickets assigned to the given staff member
    ///
    /// Sorted by priority descending, then creation time descending.
    pub fn assigned_tickets(&self, user: &User, status: Option<Status>) -> Result<Vec<Ticket>> {
        let mut tickets = self
            .store
            .find_tickets(|t| t.assignee == Some(user.id) && status.is_none_or(|s| t.status == s))?;
        tickets.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(tickets)
    }

    /// Ticket counts grouped by status and priority
    ///
    /// Scoped to the viewer's own tickets for plain users, unscoped for
    /// staff.
    pub fn statistics(&self, viewer: &User) -> Result<TicketStatistics> {
        let tickets = if viewer.role == Role::User {
            self.store.find_tickets(|t| t.owner == viewer.id)?
        } else {
            self.store.load_all_tickets()?
        };

        let mut by_status: BTreeMap<Status, usize> =
            Status::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_priority: BTreeMap<Priority, usize> =
            Priority::ALL.iter().map(|p| (*p, 0)).collect();

        for ticket in &tickets {
            *by_status.entry(ticket.status).or_insert(0) += 1;
            *by_priority.entry(ticket.priority).or_insert(0) += 1;
        }

        Ok(TicketStatistics {
            total: tickets.len(),
            by_status,
            by_priority,
        })
    }

    fn paginate(tickets: Vec<Ticket>, page: PageParams, config: &HelpdeskConfig) -> Page<Ticket> {
        let total = tickets.len();
        let limit = config.clamp_limit(page.limit);
        let items: Vec<Ticket> = tickets.into_iter().skip(page.skip).take(limit).collect();
        let has_more = page.skip + items.len() < total;

        Page {
            items,
            total,
            skip: page.skip,
            limit,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use crate::storage::{CategoryRepository, FileStorage, NotificationRepository, UserRepository};
    use tempfile::TempDir;

    struct Fixture {
        _guard: TempDir,
        storage: FileStorage,
        config: HelpdeskConfig,
        category: Category,
        owner: User,
        helper: User,
        moderator: User,
    }

    impl Fixture {
        fn new() -> Self {
            let guard = TempDir::new().unwrap();
            let storage = FileStorage::new(guard.path().join(".helpdesk"));
            let config = HelpdeskConfig::default();

            let category = Category::new("Technical Issues", "🔧", "#FF6B6B");
            storage.save_category(&category).unwrap();

            let owner = User::new("Owner");
            let mut helper = User::new("Helper");
            helper.role = Role::Helper;
            let mut moderator = User::new("Moderator");
            moderator.role = Role::Moderator;

            for user in [&owner, &helper, &moderator] {
                storage.save_user(user).unwrap();
            }

            Self {
                _guard: guard,
                storage,
                config,
                category,
                owner,
                helper,
                moderator,
            }
        }

        fn service(&self) -> TicketService<'_, FileStorage> {
            TicketService::new(&self.storage, &self.config)
        }

        fn new_ticket(&self, title: &str) -> NewTicket {
            NewTicket {
                category: self.category.id,
                title: title.to_string(),
                description: format!("Description for {title}"),
                priority: Priority::Normal,
            }
        }
    }

    #[test]
    fn test_create_validates_category_and_fields() {
        let fx = Fixture::new();
        let service = fx.service();

        let ticket = service.create(&fx.owner, fx.new_ticket("Works")).unwrap();
        assert_eq!(ticket.status, Status::Open);
        assert_eq!(ticket.owner, fx.owner.id);

        // Empty title
        let mut bad = fx.new_ticket("ok");
        bad.title = "   ".to_string();
        assert!(matches!(
            service.create(&fx.owner, bad),
            Err(HelpdeskError::Validation { .. })
        ));

        // Unknown category
        let mut bad = fx.new_ticket("ok");
        bad.category = CategoryId::new();
        assert!(matches!(
            service.create(&fx.owner, bad),
            Err(HelpdeskError::Validation { .. })
        ));
    }

    #[test]
    fn test_create_rejects_inactive_category_but_keeps_old_tickets() {
        let fx = Fixture::new();
        let service = fx.service();

        let ticket = service.create(&fx.owner, fx.new_ticket("Before")).unwrap();

        let mut category = fx.category.clone();
        category.is_active = false;
        fx.storage.save_category(&category).unwrap();

        assert!(matches!(
            service.create(&fx.owner, fx.new_ticket("After")),
            Err(HelpdeskError::Validation { .. })
        ));

        // The existing ticket is still viewable and editable
        let loaded = service.get(&fx.owner, &ticket.id).unwrap();
        assert!(loaded.can_be_edited_by(&fx.owner));
    }

    #[test]
    fn test_create_notifies_staff() {
        let fx = Fixture::new();
        let service = fx.service();
        service.create(&fx.owner, fx.new_ticket("Notify")).unwrap();

        assert_eq!(
            fx.storage
                .load_user_notifications(&fx.helper.id)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            fx.storage
                .load_user_notifications(&fx.moderator.id)
                .unwrap()
                .len(),
            1
        );
        assert!(fx
            .storage
            .load_user_notifications(&fx.owner.id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_get_enforces_view_rule() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Private")).unwrap();

        let stranger = User::new("Stranger");
        let err = service.get(&stranger, &ticket.id).unwrap_err();
        assert!(matches!(err, HelpdeskError::Permission { .. }));

        assert!(service.get(&fx.helper, &ticket.id).is_ok());
    }

    #[test]
    fn test_assign_eligibility_and_auto_advance() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Assign")).unwrap();

        // Plain users cannot assign at all
        let err = service
            .assign(&fx.owner, &ticket.id, Some(&fx.helper))
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::Permission { .. }));

        // A USER-role candidate is rejected
        let err = service
            .assign(&fx.helper, &ticket.id, Some(&fx.owner))
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidAssignee { .. }));

        // An inactive helper is rejected
        let mut inactive = fx.helper.clone();
        inactive.is_active = false;
        let err = service
            .assign(&fx.moderator, &ticket.id, Some(&inactive))
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidAssignee { .. }));

        // A valid assignment advances Open to InProgress and notifies
        let ticket = service
            .assign(&fx.moderator, &ticket.id, Some(&fx.helper))
            .unwrap();
        assert_eq!(ticket.assignee, Some(fx.helper.id));
        assert_eq!(ticket.status, Status::InProgress);
        let notifications = fx.storage.load_user_notifications(&fx.helper.id).unwrap();
        assert!(notifications
            .iter()
            .any(|n| n.kind == crate::core::NotificationType::TicketAssigned));

        // Unassigning keeps the status
        let ticket = service.assign(&fx.moderator, &ticket.id, None).unwrap();
        assert!(ticket.assignee.is_none());
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn test_update_permissions_follow_status() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Update")).unwrap();

        // Owner can edit while open
        let patch = TicketPatch {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let ticket = service.update(&fx.owner, &ticket.id, patch).unwrap();
        assert_eq!(ticket.priority, Priority::High);

        // Once in progress, the owner loses edit rights
        let patch = TicketPatch {
            status: Some(Status::InProgress),
            ..Default::default()
        };
        let ticket = service.update(&fx.moderator, &ticket.id, patch).unwrap();
        let patch = TicketPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let err = service.update(&fx.owner, &ticket.id, patch).unwrap_err();
        assert!(matches!(err, HelpdeskError::Permission { .. }));
    }

    #[test]
    fn test_update_to_closed_stamps_closed_at() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Close me")).unwrap();

        let patch = TicketPatch {
            status: Some(Status::Closed),
            ..Default::default()
        };
        let ticket = service.update(&fx.moderator, &ticket.id, patch).unwrap();
        assert_eq!(ticket.status, Status::Closed);
        assert!(ticket.closed_at.is_some());

        // Leaving Closed through a plain patch is rejected
        let patch = TicketPatch {
            status: Some(Status::Open),
            ..Default::default()
        };
        let err = service.update(&fx.moderator, &ticket.id, patch).unwrap_err();
        assert!(matches!(err, HelpdeskError::Validation { .. }));
    }

    #[test]
    fn test_close_idempotent_and_reopen_staff_only() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Lifecycle")).unwrap();

        let ticket = service.close(&fx.owner, &ticket.id).unwrap();
        assert_eq!(ticket.status, Status::Closed);
        let closed_at = ticket.closed_at.unwrap();

        // Second close is a no-op, not an error
        let ticket = service.close(&fx.moderator, &ticket.id).unwrap();
        assert_eq!(ticket.closed_at, Some(closed_at));

        // Owner cannot reopen
        let err = service.reopen(&fx.owner, &ticket.id).unwrap_err();
        assert!(matches!(err, HelpdeskError::Permission { .. }));

        let ticket = service.reopen(&fx.helper, &ticket.id).unwrap();
        assert_eq!(ticket.status, Status::Open);
        assert!(ticket.closed_at.is_none());
    }

    #[test]
    fn test_owner_cannot_close_after_leaving_open() {
        let fx = Fixture::new();
        let service = fx.service();
        let ticket = service.create(&fx.owner, fx.new_ticket("Stuck")).unwrap();

        let patch = TicketPatch {
            status: Some(Status::WaitingResponse),
            ..Default::default()
        };
        service.update(&fx.moderator, &ticket.id, patch).unwrap();

        let err = service.close(&fx.owner, &ticket.id).unwrap_err();
        assert!(matches!(err, HelpdeskError::Permission { .. }));
    }

    #[test]
    fn test_list_scopes_plain_users_to_their_own_tickets() {
        let fx = Fixture::new();
        let service = fx.service();

        let other = User::new("Other");
        fx.storage.save_user(&other).unwrap();

        service.create(&fx.owner, fx.new_ticket("Mine")).unwrap();
        service.create(&other, fx.new_ticket("Theirs")).unwrap();

        // Even an explicit owner filter for someone else is ignored
        let filter = TicketFilter {
            owner: Some(other.id),
            ..Default::default()
        };
        let page = service
            .list(&fx.owner, filter, PageParams::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.iter().all(|t| t.owner == fx.owner.id));

        // Staff see everything
        let page = service
            .list(&fx.helper, TicketFilter::default(), PageParams::default())
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_list_sorts_by_priority_then_created() {
        let fx = Fixture::new();
        let service = fx.service();

        let mut low = fx.new_ticket("Low priority");
        low.priority = Priority::Low;
        let mut critical = fx.new_ticket("Critical issue");
        critical.priority = Priority::Critical;

        service.create(&fx.owner, low).unwrap();
        service.create(&fx.owner, fx.new_ticket("Normal issue")).unwrap();
        service.create(&fx.owner, critical).unwrap();

        let page = service
            .list(&fx.helper, TicketFilter::default(), PageParams::default())
            .unwrap();
        let priorities: Vec<Priority> = page.items.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::Normal, Priority::Low]
        );
    }

    #[test]
    fn test_list_search_and_pagination() {
        let fx = Fixture::new();
        let service = fx.service();

        for i in 0..5 {
            service
                .create(&fx.owner, fx.new_ticket(&format!("Login failure {i}")))
                .unwrap();
        }
        service.create(&fx.owner, fx.new_ticket("Payment bug")).unwrap();

        // Case-insensitive substring search over title + description
        let filter = TicketFilter {
            search: Some("LOGIN".to_string()),
            ..Default::default()
        };
        let page = service
            .list(&fx.helper, filter.clone(), PageParams::default())
            .unwrap();
        assert_eq!(page.total, 5);

        let page = service
            .list(
                &fx.helper,
                filter.clone(),
                PageParams {
                    skip: 0,
                    limit: Some(2),
                },
            )
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert!(page.has_more);

        let page = service
            .list(
                &fx.helper,
                filter,
                PageParams {
                    skip: 4,
                    limit: Some(2),
                },
            )
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(!page.has_more);
    }

    #[test]
    fn test_statistics_grouping_and_scoping() {
        let fx = Fixture::new();
        let service = fx.service();

        let other = User::new("Other");
        fx.storage.save_user(&other).unwrap();

        let mine = service.create(&fx.owner, fx.new_ticket("Mine")).unwrap();
        service.create(&other, fx.new_ticket("Theirs")).unwrap();
        service.close(&fx.moderator, &mine.id).unwrap();

        let stats = service.statistics(&fx.helper).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_status[&Status::Open], 1);
        assert_eq!(stats.by_status[&Status::Closed], 1);
        assert_eq!(stats.by_priority[&Priority::Normal], 2);
        // Every status and priority is present, even at zero
        assert_eq!(stats.by_status.len(), Status::ALL.len());
        assert_eq!(stats.by_priority.len(), Priority::ALL.len());

        let stats = service.statistics(&fx.owner).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.by_status[&Status::Closed], 1);
    }

    #[test]
    fn test_statistics_serialize_for_api_handoff() {
        let fx = Fixture::new();
        let service = fx.service();
        service.create(&fx.owner, fx.new_ticket("Counted")).unwrap();

        let stats = service.statistics(&fx.helper).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["by_status"]["OPEN"], 1);
        assert_eq!(json["by_priority"]["NORMAL"], 1);
    }

    #[test]
    fn test_user_and_assigned_ticket_views() {
        let fx = Fixture::new();
        let service = fx.service();

        let first = service.create(&fx.owner, fx.new_ticket("First")).unwrap();
        service.create(&fx.owner, fx.new_ticket("Second")).unwrap();
        service
            .assign(&fx.moderator, &first.id, Some(&fx.helper))
            .unwrap();

        let mine = service
            .user_tickets(&fx.owner, None, PageParams::default())
            .unwrap();
        assert_eq!(mine.total, 2);

        let open_only = service
            .user_tickets(&fx.owner, Some(Status::Open), PageParams::default())
            .unwrap();
        assert_eq!(open_only.total, 1);

        let assigned = service.assigned_tickets(&fx.helper, None).unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, first.id);
    }
}
