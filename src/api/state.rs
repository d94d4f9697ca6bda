//! Application state for the Settlement Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

use super::directory::EmployeeDirectory;

/// Shared application state.
///
/// Immutable after start-up, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded settlement policy.
    config: Arc<ConfigLoader>,
    /// Where employee facts are looked up.
    directory: Arc<dyn EmployeeDirectory>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, directory: impl EmployeeDirectory + 'static) -> Self {
        Self {
            config: Arc::new(config),
            directory: Arc::new(directory),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee directory.
    pub fn directory(&self) -> &dyn EmployeeDirectory {
        self.directory.as_ref()
    }
}
