//! Repository layer for data access.

pub mod entities;
mod preference_repository;
mod user_repository;

pub use preference_repository::{PreferenceRepository, PreferenceStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use preference_repository::MockPreferenceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
