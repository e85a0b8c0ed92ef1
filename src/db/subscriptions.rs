//! Database operations for subscription records.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::subscription;
use crate::error::{AppError, AppResult};
use crate::models::{SubscriptionRecord, SubscriptionStatus, SubscriptionUpsert};

/// Upsert the user's subscription record (keyed on user id).
///
/// A single statement so reconciliation never commits a partial record.
pub async fn upsert(db: &DatabaseConnection, record: &SubscriptionUpsert) -> AppResult<()> {
    let model = subscription::ActiveModel {
        user_id: Set(record.user_id),
        plan: Set(record.plan.clone()),
        status: Set(record.status.as_str().to_string()),
        stripe_subscription_id: Set(Some(record.stripe_subscription_id.clone())),
        stripe_customer_id: Set(Some(record.stripe_customer_id.clone())),
        stripe_price_id: Set(Some(record.stripe_price_id.clone())),
        current_period_start: Set(Some(record.current_period_start)),
        current_period_end: Set(Some(record.current_period_end)),
        trial_ends_at: Set(record.trial_ends_at),
        ..Default::default()
    };

    subscription::Entity::insert(model)
        .on_conflict(
            OnConflict::column(subscription::Column::UserId)
                .update_columns([
                    subscription::Column::Plan,
                    subscription::Column::Status,
                    subscription::Column::StripeSubscriptionId,
                    subscription::Column::StripeCustomerId,
                    subscription::Column::StripePriceId,
                    subscription::Column::CurrentPeriodStart,
                    subscription::Column::CurrentPeriodEnd,
                    subscription::Column::TrialEndsAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Find the user's subscription record, if any.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Option<SubscriptionRecord>> {
    let model = subscription::Entity::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    model.map(model_to_record).transpose()
}

fn model_to_record(m: subscription::Model) -> AppResult<SubscriptionRecord> {
    let status = SubscriptionStatus::parse(&m.status)
        .ok_or_else(|| AppError::Database(format!("Unknown subscription status '{}'", m.status)))?;

    Ok(SubscriptionRecord {
        user_id: m.user_id,
        plan: m.plan,
        status,
        stripe_subscription_id: m.stripe_subscription_id,
        stripe_customer_id: m.stripe_customer_id,
        stripe_price_id: m.stripe_price_id,
        current_period_start: m.current_period_start,
        current_period_end: m.current_period_end,
        trial_ends_at: m.trial_ends_at,
    })
}
