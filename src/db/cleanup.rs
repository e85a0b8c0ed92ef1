//! Best-effort removal of user-owned rows across auxiliary tables.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use uuid::Uuid;

use crate::error::AppResult;

/// Auxiliary tables holding user-owned rows, with their user-id column.
///
/// Deletion from these is cleanup, not the authoritative removal: a failure
/// on one table is logged and the rest of the list still runs.
pub const USER_OWNED_TABLES: &[(&str, &str)] = &[
    ("refresh_tokens", "user_id"),
    ("user_achievements", "user_id"),
    ("user_badges", "user_id"),
    ("user_connections", "user_id"),
    ("user_follows", "user_id"),
    ("user_interests", "user_id"),
    ("user_memories", "user_id"),
    ("user_mfa_settings", "user_id"),
    ("user_points", "user_id"),
    ("user_privacy_settings", "user_id"),
    ("subscriptions", "user_id"),
    ("stripe_customers", "user_id"),
    ("chat_participants", "user_id"),
    ("project_members", "user_id"),
];

/// Result of purging one table.
#[derive(Debug)]
pub struct TablePurge {
    pub table: &'static str,
    pub result: AppResult<u64>,
}

/// Delete all rows owned by the user from every auxiliary table.
///
/// Each table is an independent fallible delete; results are collected and
/// never short-circuit.
pub async fn purge_user_rows(db: &DatabaseConnection, user_id: Uuid) -> Vec<TablePurge> {
    let mut results = Vec::with_capacity(USER_OWNED_TABLES.len());

    for (table, column) in USER_OWNED_TABLES {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            format!("DELETE FROM {} WHERE {} = $1", table, column),
            [(user_id).into()],
        );

        let result = db
            .execute(stmt)
            .await
            .map(|res| res.rows_affected())
            .map_err(Into::into);

        results.push(TablePurge { table, result });
    }

    results
}
