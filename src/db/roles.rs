//! Database operations for role assignments.
//!
//! The role store is deliberately uncached: the last-privileged-holder
//! safeguard needs the current committed state on every call.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::user_role;
use crate::error::AppResult;
use crate::models::role::{Role, RoleGuardOutcome};

/// Does the user hold the given role?
pub async fn has_role(db: &DatabaseConnection, user_id: Uuid, role: Role) -> AppResult<bool> {
    let count = user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::Role.eq(role.as_str()))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// All roles held by the user, in assignment order.
pub async fn roles_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<Role>> {
    let rows = user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    // Unknown role strings cannot occur under the CHECK constraint; skip
    // rather than fail if one ever does.
    Ok(rows.iter().filter_map(|m| Role::parse(&m.role)).collect())
}

/// System-wide count of users holding the role.
pub async fn count_holders(db: &DatabaseConnection, role: Role) -> AppResult<u64> {
    let count = user_role::Entity::find()
        .filter(user_role::Column::Role.eq(role.as_str()))
        .count(db)
        .await?;

    Ok(count)
}

/// Delete the target's role rows unless the target is the sole holder of a
/// privileged role.
///
/// The holder counts and the delete run in one serializable transaction so
/// two concurrent deletions cannot both pass the count check and then
/// remove two sole holders.
pub async fn delete_roles_guarded(
    db: &DatabaseConnection,
    target: Uuid,
) -> AppResult<RoleGuardOutcome> {
    let txn = db
        .begin_with_config(Some(IsolationLevel::Serializable), None)
        .await?;

    let rows = user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(target))
        .all(&txn)
        .await?;
    let held: Vec<Role> = rows.iter().filter_map(|m| Role::parse(&m.role)).collect();

    // Every privileged role held must survive elsewhere, not just the first.
    for role in held.iter().copied().filter(Role::is_privileged) {
        let holders = user_role::Entity::find()
            .filter(user_role::Column::Role.eq(role.as_str()))
            .count(&txn)
            .await?;

        if holders <= 1 {
            txn.rollback().await?;
            return Ok(RoleGuardOutcome::Blocked { role });
        }
    }

    user_role::Entity::delete_many()
        .filter(user_role::Column::UserId.eq(target))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(RoleGuardOutcome::Deleted { roles: held })
}
