//! Directory service - account lifecycle and per-user config values.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{Password, User, Username};

use crate::repository::{PreferenceRepository, UserRepository};

/// Directory operations exposed over gRPC.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Whether an account with this username exists
    async fn user_exists(&self, username: &Username) -> AppResult<bool>;

    /// Create an account. The password is hashed before it is stored.
    async fn create_user(&self, username: Username, password: &str) -> AppResult<User>;

    async fn set_email(&self, username: &Username, email: String) -> AppResult<User>;

    async fn set_display_name(&self, username: &Username, display_name: String) -> AppResult<User>;

    /// Store `value` under `(app_id, key)` for an existing account.
    async fn set_user_value(
        &self,
        username: &Username,
        app_id: &str,
        key: &str,
        value: String,
    ) -> AppResult<()>;
}

/// Repository-backed implementation of DirectoryService.
pub struct DirectoryManager {
    users: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferenceRepository>,
}

impl DirectoryManager {
    pub fn new(users: Arc<dyn UserRepository>, preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self { users, preferences }
    }

    fn require_username(username: &Username) -> AppResult<()> {
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryService for DirectoryManager {
    async fn user_exists(&self, username: &Username) -> AppResult<bool> {
        if username.is_empty() {
            return Ok(false);
        }
        self.users.exists(username.as_str()).await
    }

    async fn create_user(&self, username: Username, password: &str) -> AppResult<User> {
        Self::require_username(&username)?;

        if self.users.exists(username.as_str()).await? {
            return Err(AppError::conflict("Username"));
        }

        let password = Password::new(password)?;
        let user = self
            .users
            .create(username.into_string(), password.into_string())
            .await?;

        tracing::info!(username = %user.username, "Account created");
        Ok(user)
    }

    async fn set_email(&self, username: &Username, email: String) -> AppResult<User> {
        Self::require_username(username)?;
        self.users.set_email(username.as_str(), email).await
    }

    async fn set_display_name(&self, username: &Username, display_name: String) -> AppResult<User> {
        Self::require_username(username)?;
        self.users
            .set_display_name(username.as_str(), display_name)
            .await
    }

    async fn set_user_value(
        &self,
        username: &Username,
        app_id: &str,
        key: &str,
        value: String,
    ) -> AppResult<()> {
        Self::require_username(username)?;
        if app_id.is_empty() || key.is_empty() {
            return Err(AppError::validation("App id and key must not be empty"));
        }

        self.users
            .find_by_uid(username.as_str())
            .await?
            .ok_or_not_found()?;

        self.preferences
            .set_value(username.as_str(), app_id, key, value)
            .await
    }
}
