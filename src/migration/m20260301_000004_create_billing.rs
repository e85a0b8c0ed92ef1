//! Migration: Create subscriptions and stripe_customers tables.

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
                CREATE TABLE subscriptions (
                    id BIGSERIAL PRIMARY KEY,
                    user_id UUID NOT NULL UNIQUE,
                    plan VARCHAR(50) NOT NULL,
                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('trialing', 'active', 'past_due', 'canceled')),
                    stripe_subscription_id VARCHAR(255),
                    stripe_customer_id VARCHAR(255),
                    stripe_price_id VARCHAR(255),
                    current_period_start TIMESTAMPTZ,
                    current_period_end TIMESTAMPTZ,
                    trial_ends_at TIMESTAMPTZ,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TRIGGER update_subscriptions_updated_at
                    BEFORE UPDATE ON subscriptions
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();

                CREATE TABLE stripe_customers (
                    user_id UUID PRIMARY KEY,
                    stripe_customer_id VARCHAR(255) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_stripe_customers_customer_id
                    ON stripe_customers(stripe_customer_id);
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
                DROP TRIGGER IF EXISTS update_subscriptions_updated_at ON subscriptions;
                DROP TABLE IF EXISTS subscriptions CASCADE;
                DROP TABLE IF EXISTS stripe_customers CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
