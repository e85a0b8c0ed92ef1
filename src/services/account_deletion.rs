//! Account deletion orchestration.
//!
//! Ordering is the contract here: input validation, then authorization,
//! then the last-privileged-role safeguard, and only then any mutation.
//! Auxiliary-table cleanup is best-effort; the identity-provider delete is
//! the authoritative step and its failure is the operation's failure.

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::role::RoleGuardOutcome;
use crate::models::{AuditAction, AuthenticatedUser, NewAuditEntry, Role};
use crate::services::audit;
use crate::services::identity::IdentityAdmin;
use crate::store::Store;

/// Result of a completed account deletion.
#[derive(Debug)]
pub struct DeletionReport {
    pub target: Uuid,
    /// Rows removed per auxiliary table (successful deletes only)
    pub purged_rows: u64,
    /// Number of auxiliary tables whose cleanup failed (logged, not fatal)
    pub cleanup_failures: usize,
}

/// Validate that the target id is a textual UUID v4.
///
/// Runs before any store access so malformed input never reaches the role
/// store.
fn parse_target_id(target_id: &str) -> AppResult<Uuid> {
    let uuid = Uuid::parse_str(target_id)
        .map_err(|_| AppError::InvalidInput("Invalid user id".to_string()))?;

    if uuid.get_version_num() != 4 {
        return Err(AppError::InvalidInput("Invalid user id".to_string()));
    }

    Ok(uuid)
}

/// Delete the target account and all owned data.
///
/// Exactly one audit entry is written per terminal outcome: denied,
/// blocked by the safeguard, or success.
pub async fn delete_account(
    store: &dyn Store,
    identity: &dyn IdentityAdmin,
    requester: &AuthenticatedUser,
    target_id: &str,
) -> AppResult<DeletionReport> {
    let target = parse_target_id(target_id)?;

    // Authorization, first match wins: self-deletion, then admin.
    let authorized = requester.id == target || store.has_role(requester.id, Role::Admin).await?;

    if !authorized {
        audit::record(
            store,
            NewAuditEntry::for_user(
                requester.id,
                AuditAction::DeleteUserDenied,
                target,
                json!({ "reason": "Insufficient permissions" }),
            ),
        )
        .await;

        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }

    // Safeguard + role-row deletion, atomic in the store.
    match store.delete_roles_guarded(target).await? {
        RoleGuardOutcome::Blocked { role } => {
            let reason = format!("Cannot delete the last {}", role.label());

            audit::record(
                store,
                NewAuditEntry::for_user(
                    requester.id,
                    AuditAction::DeleteUserDenied,
                    target,
                    json!({ "reason": reason, "role": role.as_str() }),
                ),
            )
            .await;

            return Err(AppError::Forbidden(reason));
        }
        RoleGuardOutcome::Deleted { roles } => {
            info!(
                target = %target,
                roles = ?roles,
                "Role assignments removed for account deletion"
            );
        }
    }

    // Best-effort cleanup across auxiliary tables. Failures are logged and
    // the remaining tables still run; the results list is inspected only
    // for logging, never for control flow.
    let purges = store.purge_user_rows(target).await;
    let mut purged_rows = 0u64;
    let mut cleanup_failures = 0usize;
    for purge in &purges {
        match &purge.result {
            Ok(rows) => purged_rows += rows,
            Err(e) => {
                cleanup_failures += 1;
                warn!(
                    target = %target,
                    table = purge.table,
                    "Cleanup delete failed: {}",
                    e
                );
            }
        }
    }

    if let Err(e) = store.delete_profile(target).await {
        warn!(target = %target, "Profile delete failed: {}", e);
    }

    // Authoritative step: the identity itself. Failure aborts.
    identity.delete_user(target).await?;

    audit::record(
        store,
        NewAuditEntry::for_user(
            requester.id,
            AuditAction::DeleteUserSuccess,
            target,
            json!({ "actor": requester.id.to_string() }),
        ),
    )
    .await;

    info!(
        actor = %requester.id,
        target = %target,
        purged_rows,
        cleanup_failures,
        "Account deleted"
    );

    Ok(DeletionReport {
        target,
        purged_rows,
        cleanup_failures,
    })
}
