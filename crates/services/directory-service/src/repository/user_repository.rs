//! Account repository keyed by login name.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether an account with this login name exists
    async fn exists(&self, uid: &str) -> AppResult<bool>;

    /// Find an account by login name
    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<User>>;

    /// Insert a new account. A taken login name yields `AppError::Conflict`.
    async fn create(&self, uid: String, password_hash: String) -> AppResult<User>;

    /// Set the account's email address
    async fn set_email(&self, uid: &str, email: String) -> AppResult<User>;

    /// Set the account's display name
    async fn set_display_name(&self, uid: &str, display_name: String) -> AppResult<User>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, uid: &str) -> AppResult<user::Model> {
        UserEntity::find()
            .filter(user::Column::Uid.eq(uid))
            .one(&self.db)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn exists(&self, uid: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Uid.eq(uid))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Uid.eq(uid))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, uid: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            uid: Set(uid),
            password_hash: Set(password_hash),
            email: Set(None),
            display_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_email(&self, uid: &str, email: String) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(uid).await?.into();
        active.email = Set(Some(email));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_display_name(&self, uid: &str, display_name: String) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(uid).await?.into();
        active.display_name = Set(Some(display_name));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
