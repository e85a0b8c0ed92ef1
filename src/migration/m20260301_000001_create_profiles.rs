//! Migration: Create profiles table.
//!
//! Holds the per-user profile row plus the denormalized entitlement mirror
//! (subscription_status / subscription_plan).

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
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TABLE profiles (
                    id UUID PRIMARY KEY,
                    email VARCHAR(255),
                    display_name VARCHAR(255),
                    subscription_status VARCHAR(20),
                    subscription_plan VARCHAR(50),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TRIGGER update_profiles_updated_at
                    BEFORE UPDATE ON profiles
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_profiles_updated_at ON profiles;
                DROP TABLE IF EXISTS profiles CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
