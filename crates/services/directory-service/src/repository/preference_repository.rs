//! Per-user key/value preferences.

use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::preference::{self, ActiveModel, Entity as PreferenceEntity};
use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Insert or overwrite the value stored under `(uid, app_id, key)`.
    async fn set_value(&self, uid: &str, app_id: &str, key: &str, value: String) -> AppResult<()>;
}

pub struct PreferenceStore {
    db: DatabaseConnection,
}

impl PreferenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepository for PreferenceStore {
    async fn set_value(&self, uid: &str, app_id: &str, key: &str, value: String) -> AppResult<()> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(uid.to_string()),
            app_id: Set(app_id.to_string()),
            config_key: Set(key.to_string()),
            config_value: Set(value),
            created_at: Set(now),
            updated_at: Set(now),
        };

        PreferenceEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    preference::Column::UserId,
                    preference::Column::AppId,
                    preference::Column::ConfigKey,
                ])
                .update_columns([preference::Column::ConfigValue, preference::Column::UpdatedAt])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
