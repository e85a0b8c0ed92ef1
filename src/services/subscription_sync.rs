//! Subscription reconciliation against the payment provider.
//!
//! The provider is the source of truth; local records are overwritten to
//! match. The operation is idempotent and commits nothing on failure (one
//! upsert statement per table).

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PLAN_LOOKUP_PREFIX;
use crate::error::{AppError, AppResult};
use crate::models::{SubscriptionStatus, SubscriptionUpsert};
use crate::services::stripe::PaymentProvider;
use crate::store::Store;

/// Terminal outcomes of a reconciliation call. The first two are valid
/// states for an unsubscribed user, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    NoCustomer,
    NoActiveSubscription,
    Synced { plan: String },
}

/// Derive a plan name from a price lookup key or metadata value by
/// stripping the product prefix and a billing-interval suffix.
/// `sitecrew_pro_monthly` and `sitecrew_pro_yearly` both resolve to `pro`.
fn derive_plan_name(raw: &str) -> String {
    let stripped = raw.strip_prefix(PLAN_LOOKUP_PREFIX).unwrap_or(raw);
    let stripped = stripped
        .strip_suffix("_monthly")
        .or_else(|| stripped.strip_suffix("_yearly"))
        .unwrap_or(stripped);

    stripped.to_string()
}

/// Convert provider period boundaries (integer Unix seconds) to calendar
/// timestamps. The provider reports seconds; timestamps are stored from
/// millisecond epochs, so the value is scaled by 1000 first.
fn period_timestamp(epoch_seconds: i64) -> AppResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(epoch_seconds * 1000)
        .ok_or_else(|| AppError::Upstream("Subscription period out of range".to_string()))
}

/// Pull the user's active subscription from the provider and overwrite the
/// local record and profile mirror to match.
pub async fn sync_subscription(
    store: &dyn Store,
    payments: &dyn PaymentProvider,
    user_id: Uuid,
) -> AppResult<SyncOutcome> {
    let Some(customer_id) = store.stripe_customer_id(user_id).await? else {
        return Ok(SyncOutcome::NoCustomer);
    };

    let Some(subscription) = payments.latest_active_subscription(&customer_id).await? else {
        return Ok(SyncOutcome::NoActiveSubscription);
    };

    let plan = subscription
        .price_lookup_key
        .as_deref()
        .or(subscription.metadata_plan.as_deref())
        .map(derive_plan_name)
        .ok_or_else(|| {
            AppError::Upstream("Subscription has no price lookup key or plan metadata".to_string())
        })?;

    let record = SubscriptionUpsert {
        user_id,
        plan: plan.clone(),
        status: SubscriptionStatus::Active,
        stripe_subscription_id: subscription.id,
        stripe_customer_id: subscription.customer_id,
        stripe_price_id: subscription.price_id,
        current_period_start: period_timestamp(subscription.current_period_start)?,
        current_period_end: period_timestamp(subscription.current_period_end)?,
        // An active paid subscription ends any trial.
        trial_ends_at: None,
    };

    store.upsert_subscription(&record).await?;

    let mirrored = store
        .update_entitlement_mirror(user_id, SubscriptionStatus::Active.as_str(), &plan)
        .await?;
    if mirrored == 0 {
        warn!(
            user_id = %user_id,
            "No profile row found for the entitlement mirror update"
        );
    }

    info!(user_id = %user_id, plan = %plan, "Subscription reconciled");

    Ok(SyncOutcome::Synced { plan })
}
