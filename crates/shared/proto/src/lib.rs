//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - UserDirectory: account lookup/creation and per-user config values

/// User directory service definitions.
pub mod directory {
    tonic::include_proto!("directory");
}

// Re-export commonly used items
pub use directory::user_directory_client::UserDirectoryClient;
pub use directory::user_directory_server::{UserDirectory, UserDirectoryServer};
