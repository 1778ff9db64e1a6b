//! Runtime configuration
//!
//! Tunables the calling layer injects at the boundary. Everything has a
//! sensible default so construction never requires a config file.

use crate::error::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the helpdesk core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpdeskConfig {
    /// Root directory for the bundled file store
    pub data_dir: PathBuf,
    /// How long a message author may edit their own message, in minutes
    pub message_edit_window_minutes: i64,
    /// Page size used when the caller does not specify a limit
    pub default_page_size: usize,
    /// Hard upper bound on requested page sizes
    pub max_page_size: usize,
}

impl Default for HelpdeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".helpdesk"),
            message_edit_window_minutes: 5,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl HelpdeskConfig {
    /// Load configuration from an optional YAML file plus `HELPDESK_*`
    /// environment variables, falling back to defaults for anything unset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("HELPDESK"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The message edit window as a duration
    #[must_use]
    pub fn edit_window(&self) -> Duration {
        Duration::minutes(self.message_edit_window_minutes)
    }

    /// Clamp a requested page size to the configured bounds
    #[must_use]
    pub fn clamp_limit(&self, limit: Option<usize>) -> usize {
        limit
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}
