//! Entitlement gate: answers plan/quota questions from reconciled records.

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Plan, SubscriptionStatus, FREE_TIER_LIMITS};
use crate::store::Store;

/// Entitlement state exposed to the UI layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Entitlements {
    /// Reconciled plan name, if any subscription record exists
    pub plan: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub trial_active: bool,
    pub trial_days_left: i64,
    pub seat_limit: u32,
    pub project_limit: u32,
}

impl Entitlements {
    fn free_tier() -> Self {
        Self {
            plan: None,
            status: None,
            trial_active: false,
            trial_days_left: 0,
            seat_limit: FREE_TIER_LIMITS.seat_limit,
            project_limit: FREE_TIER_LIMITS.project_limit,
        }
    }

    /// Does the current state entitle the user to paid features?
    pub fn is_paid(&self) -> bool {
        matches!(
            self.status,
            Some(SubscriptionStatus::Active) | Some(SubscriptionStatus::Trialing)
        )
    }
}

/// Read the user's entitlement state from the reconciled subscription
/// record and the static plan-limit table.
pub async fn entitlements_for(store: &dyn Store, user_id: Uuid) -> AppResult<Entitlements> {
    let Some(record) = store.find_subscription(user_id).await? else {
        return Ok(Entitlements::free_tier());
    };

    // Unknown plan names (e.g. a plan retired from the table) fall back to
    // free-tier limits rather than failing the gate.
    let limits = Plan::parse(&record.plan)
        .map(|p| p.limits())
        .unwrap_or(FREE_TIER_LIMITS);

    let now = Utc::now();
    let (trial_active, trial_days_left) = match (record.status, record.trial_ends_at) {
        (SubscriptionStatus::Trialing, Some(ends_at)) if ends_at > now => {
            (true, (ends_at - now).num_days().max(0))
        }
        _ => (false, 0),
    };

    Ok(Entitlements {
        plan: Some(record.plan),
        status: Some(record.status),
        trial_active,
        trial_days_left,
        seat_limit: limits.seat_limit,
        project_limit: limits.project_limit,
    })
}
