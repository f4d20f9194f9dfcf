//! Outbound ports of the guests app.
//!
//! The directory and config store live in the directory service; the
//! random generator is local. Each is injected as a trait object so the
//! provisioning logic can be tested without any of them.

use async_trait::async_trait;

use common::AppResult;
use domain::Username;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account operations of the user directory.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, username: &Username) -> AppResult<bool>;

    /// Create an account. A taken username yields `AppError::Conflict`.
    async fn create_user(&self, username: &Username, password: &str) -> AppResult<()>;

    async fn set_email(&self, username: &Username, email: &str) -> AppResult<()>;

    async fn set_display_name(&self, username: &Username, display_name: &str) -> AppResult<()>;
}

/// Per-user config values, namespaced by app id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn set_user_value(
        &self,
        username: &Username,
        app_id: &str,
        key: &str,
        value: &str,
    ) -> AppResult<()>;
}

/// Random string generator backed by a CSPRNG.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait SecureRandom: Send + Sync {
    /// Password-strength string of `length` characters.
    fn generate(&self, length: usize) -> String;

    /// String of `length` characters drawn from `alphabet` only.
    fn generate_medium(&self, length: usize, alphabet: &str) -> String;
}
