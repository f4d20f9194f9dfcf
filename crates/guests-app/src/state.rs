//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::{GuestService, UserDirectory};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub guests: Arc<dyn GuestService>,
    /// Used by the health check
    pub directory: Arc<dyn UserDirectory>,
}

impl AppState {
    pub fn new(guests: Arc<dyn GuestService>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { guests, directory }
    }
}
