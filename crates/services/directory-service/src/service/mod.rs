//! Service layer - directory business logic.

mod directory_service;

pub use directory_service::{DirectoryManager, DirectoryService};
