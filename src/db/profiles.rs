//! Database operations for profiles and the entitlement mirror.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::profile;
use crate::error::AppResult;

/// Update the denormalized subscription fields on the user's profile row.
/// Returns the number of rows updated; zero means no profile row exists.
pub async fn update_entitlement_mirror(
    db: &DatabaseConnection,
    user_id: Uuid,
    status: &str,
    plan: &str,
) -> AppResult<u64> {
    let res = profile::Entity::update_many()
        .col_expr(profile::Column::SubscriptionStatus, Expr::value(status))
        .col_expr(profile::Column::SubscriptionPlan, Expr::value(plan))
        .filter(profile::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    Ok(res.rows_affected)
}

/// Delete the user's profile row. Returns the number of rows removed.
pub async fn delete_profile(db: &DatabaseConnection, user_id: Uuid) -> AppResult<u64> {
    let res = profile::Entity::delete_by_id(user_id).exec(db).await?;

    Ok(res.rows_affected)
}

/// Does a profile row exist for the user?
pub async fn exists(db: &DatabaseConnection, user_id: Uuid) -> AppResult<bool> {
    let row = profile::Entity::find_by_id(user_id).one(db).await?;

    Ok(row.is_some())
}
