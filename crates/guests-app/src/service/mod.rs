//! Service layer - guest provisioning and the ports it depends on.

mod guest_service;
mod ports;
mod random;

pub use guest_service::{GuestProvisioner, GuestService};
pub use ports::{ConfigStore, SecureRandom, UserDirectory};
pub use random::RandomGenerator;

#[cfg(any(test, feature = "test-utils"))]
pub use ports::{MockConfigStore, MockSecureRandom, MockUserDirectory};
