//! Migration: Create user_roles table.
//!
//! One row per (user, role). The unique index makes a per-role row count
//! equal the holder count, which the last-admin safeguard depends on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE user_roles (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    role VARCHAR(20) NOT NULL
                        CHECK (role IN ('member', 'moderator', 'admin', 'system_admin')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    UNIQUE (user_id, role)
                );

                CREATE INDEX idx_user_roles_role ON user_roles(role);
                CREATE INDEX idx_user_roles_user_id ON user_roles(user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS user_roles CASCADE;")
            .await?;

        Ok(())
    }
}
