//! Database module providing connection management and per-table queries.

pub mod audit;
pub mod cleanup;
pub mod profiles;
pub mod roles;
pub mod stripe_customers;
pub mod subscriptions;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::error::AppResult;

/// Database connection pool wrapper around SeaORM's connection.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the configured URL.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options
            .max_connections(20)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options).await?;
        Ok(DbPool { conn })
    }

    /// Wrap an existing connection (used by tests).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }

    /// Get the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
