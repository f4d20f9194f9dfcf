//! Domain layer - Guest accounts, usernames and directory users.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! It is shared by the guests app, the directory service and the harness so
//! that every component derives usernames the same way.

pub mod constants;
pub mod error;
pub mod guest;
pub mod password;
pub mod user;
pub mod username;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use guest::{is_valid_mail_address, GuestAccountRequest, GuestMetadata, UserValue};
pub use password::Password;
pub use user::User;
pub use username::Username;
