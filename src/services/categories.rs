//! Category registry operations
//!
//! Categories are created and curated by admins. They are soft-disabled
//! rather than deleted so existing tickets keep a valid reference.

use crate::core::{Category, CategoryId, User, DEFAULT_CATEGORIES};
use crate::error::{HelpdeskError, Result};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Data for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub sort_order: i32,
}

fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Operations on the category registry
pub struct CategoryService<'a, S: Storage> {
    store: &'a S,
}

impl<'a, S: Storage> CategoryService<'a, S> {
    /// Create a service over the given store
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn require_admin(actor: &User, action: &str) -> Result<()> {
        if actor.can_manage_users() {
            Ok(())
        } else {
            Err(HelpdeskError::permission(action))
        }
    }

    /// Create a category, admin only
    pub fn create(&self, actor: &User, new: NewCategory) -> Result<Category> {
        Self::require_admin(actor, "create category")?;

        if new.name.trim().is_empty() {
            return Err(HelpdeskError::validation("Category name must not be empty"));
        }
        if !is_valid_color(&new.color) {
            return Err(HelpdeskError::validation(format!(
                "Invalid color '{}', expected #RRGGBB",
                new.color
            )));
        }
        if self.store.find_category_by_name(&new.name)?.is_some() {
            return Err(HelpdeskError::validation(format!(
                "Category '{}' already exists",
                new.name
            )));
        }

        let mut category = Category::new(new.name, new.icon, new.color);
        category.description = new.description;
        category.sort_order = new.sort_order;
        self.store.save_category(&category)?;
        debug!("created category {}", category.name);
        Ok(category)
    }

    /// Load a category by id
    pub fn get(&self, id: &CategoryId) -> Result<Category> {
        self.store.load_category(id)
    }

    /// All active categories, ordered by sort order then name
    pub fn list_active(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .store
            .load_all_categories()?
            .into_iter()
            .filter(|c| c.is_active)
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    /// Enable or soft-disable a category, admin only
    pub fn set_active(&self, actor: &User, id: &CategoryId, active: bool) -> Result<Category> {
        Self::require_admin(actor, "change category state")?;

        let mut category = self.store.load_category(id)?;
        category.is_active = active;
        self.store.save_category(&category)?;
        debug!(
            "category {} is now {}",
            category.name,
            if active { "active" } else { "disabled" }
        );
        Ok(category)
    }

    /// Change a category's sort position, admin only
    pub fn set_sort_order(&self, actor: &User, id: &CategoryId, sort_order: i32) -> Result<Category> {
        Self::require_admin(actor, "reorder category")?;

        let mut category = self.store.load_category(id)?;
        category.sort_order = sort_order;
        self.store.save_category(&category)?;
        Ok(category)
    }

    /// Create the default category set, skipping names that already exist
    ///
    /// Returns the categories that were actually created.
    pub fn seed_defaults(&self, actor: &User) -> Result<Vec<Category>> {
        Self::require_admin(actor, "seed default categories")?;

        let mut created = Vec::new();
        for seed in DEFAULT_CATEGORIES.iter() {
            if self.store.find_category_by_name(seed.name)?.is_some() {
                continue;
            }
            let mut category = Category::new(seed.name, seed.icon, seed.color);
            category.description = Some(seed.description.to_string());
            category.sort_order = seed.sort_order;
            self.store.save_category(&category)?;
            created.push(category);
        }
        debug!("seeded {} default categories", created.len());
        Ok(created)
    }
}
