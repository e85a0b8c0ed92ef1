//! Migration: Create audit_logs table (append-only).

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
                CREATE TABLE audit_logs (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID,
                    action VARCHAR(50) NOT NULL,
                    resource_type VARCHAR(50) NOT NULL,
                    resource_id VARCHAR(255),
                    details JSONB,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_audit_logs_user_id ON audit_logs(user_id);
                CREATE INDEX idx_audit_logs_action ON audit_logs(action);
                CREATE INDEX idx_audit_logs_created_at ON audit_logs(created_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS audit_logs CASCADE;")
            .await?;

        Ok(())
    }
}
