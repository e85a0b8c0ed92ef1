//! Migration: Create auxiliary user-owned tables.
//!
//! These tables are populated by other parts of the product; this service
//! only touches them during the best-effort cleanup pass of an account
//! deletion, so minimal shapes are enough here.

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
                CREATE TABLE refresh_tokens (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    token_hash VARCHAR(64) NOT NULL,
                    expires_at TIMESTAMPTZ NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_refresh_tokens_user_id ON refresh_tokens(user_id);

                CREATE TABLE user_achievements (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    achievement VARCHAR(100) NOT NULL,
                    earned_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_user_achievements_user_id ON user_achievements(user_id);

                CREATE TABLE user_badges (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    badge VARCHAR(100) NOT NULL,
                    awarded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_user_badges_user_id ON user_badges(user_id);

                CREATE TABLE user_connections (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    connected_user_id UUID NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_user_connections_user_id ON user_connections(user_id);

                CREATE TABLE user_follows (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    followed_user_id UUID NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_user_follows_user_id ON user_follows(user_id);

                CREATE TABLE user_interests (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    interest VARCHAR(100) NOT NULL
                );
                CREATE INDEX idx_user_interests_user_id ON user_interests(user_id);

                CREATE TABLE user_memories (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    content TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_user_memories_user_id ON user_memories(user_id);

                CREATE TABLE user_mfa_settings (
                    user_id UUID PRIMARY KEY,
                    totp_enabled BOOLEAN NOT NULL DEFAULT FALSE,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TABLE user_points (
                    user_id UUID PRIMARY KEY,
                    points BIGINT NOT NULL DEFAULT 0,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TABLE user_privacy_settings (
                    user_id UUID PRIMARY KEY,
                    profile_visible BOOLEAN NOT NULL DEFAULT TRUE,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TABLE chat_participants (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    chat_id UUID NOT NULL,
                    joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_chat_participants_user_id ON chat_participants(user_id);

                CREATE TABLE project_members (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL,
                    project_id UUID NOT NULL,
                    joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_project_members_user_id ON project_members(user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS refresh_tokens CASCADE;
                DROP TABLE IF EXISTS user_achievements CASCADE;
                DROP TABLE IF EXISTS user_badges CASCADE;
                DROP TABLE IF EXISTS user_connections CASCADE;
                DROP TABLE IF EXISTS user_follows CASCADE;
                DROP TABLE IF EXISTS user_interests CASCADE;
                DROP TABLE IF EXISTS user_memories CASCADE;
                DROP TABLE IF EXISTS user_mfa_settings CASCADE;
                DROP TABLE IF EXISTS user_points CASCADE;
                DROP TABLE IF EXISTS user_privacy_settings CASCADE;
                DROP TABLE IF EXISTS chat_participants CASCADE;
                DROP TABLE IF EXISTS project_members CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
