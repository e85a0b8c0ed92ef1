//! Database operations for the user-to-customer mapping.

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::entity::stripe_customer;
use crate::error::AppResult;

/// Resolve the payment-provider customer id for a user, if one exists.
pub async fn find_customer_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Option<String>> {
    let row = stripe_customer::Entity::find_by_id(user_id).one(db).await?;

    Ok(row.map(|m| m.stripe_customer_id))
}
