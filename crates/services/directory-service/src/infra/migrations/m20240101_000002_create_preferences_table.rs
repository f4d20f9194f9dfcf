//! Migration: Create the per-user preferences table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Preferences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Preferences::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Preferences::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(Preferences::AppId).string_len(32).not_null())
                    .col(ColumnDef::new(Preferences::ConfigKey).string_len(64).not_null())
                    .col(ColumnDef::new(Preferences::ConfigValue).text().not_null())
                    .col(
                        ColumnDef::new(Preferences::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Preferences::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One value per (user, app, key)
        manager
            .create_index(
                Index::create()
                    .name("idx_preferences_user_app_key")
                    .table(Preferences::Table)
                    .col(Preferences::UserId)
                    .col(Preferences::AppId)
                    .col(Preferences::ConfigKey)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_preferences_user_app_key")
                    .table(Preferences::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Preferences::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Preferences {
    Table,
    Id,
    UserId,
    AppId,
    ConfigKey,
    ConfigValue,
    CreatedAt,
    UpdatedAt,
}
