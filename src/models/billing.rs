//! Billing and entitlement models.
//!
//! Plan identity, billing mode, and per-plan limits are compile-time
//! enum-keyed tables. The payment provider remains the source of truth for
//! *which* plan a user is on; these tables only describe the plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// How a plan is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    Subscription,
    OneTimePayment,
}

/// Seat and project quotas attached to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlanLimits {
    pub seat_limit: u32,
    pub project_limit: u32,
}

/// Quotas applied when a user has no reconciled subscription (free tier)
/// or an unrecognized plan name.
pub const FREE_TIER_LIMITS: PlanLimits = PlanLimits {
    seat_limit: 3,
    project_limit: 2,
};

/// Known Sitecrew plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Starter,
    Pro,
    Business,
    Lifetime,
}

impl Plan {
    /// Plan name as stored in subscription records and price lookup keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Starter => "starter",
            Plan::Pro => "pro",
            Plan::Business => "business",
            Plan::Lifetime => "lifetime",
        }
    }

    /// Parse a stored plan name.
    pub fn parse(s: &str) -> Option<Plan> {
        match s {
            "starter" => Some(Plan::Starter),
            "pro" => Some(Plan::Pro),
            "business" => Some(Plan::Business),
            "lifetime" => Some(Plan::Lifetime),
            _ => None,
        }
    }

    pub fn billing_mode(&self) -> BillingMode {
        match self {
            Plan::Starter | Plan::Pro | Plan::Business => BillingMode::Subscription,
            Plan::Lifetime => BillingMode::OneTimePayment,
        }
    }

    pub fn limits(&self) -> PlanLimits {
        match self {
            Plan::Starter => PlanLimits {
                seat_limit: 5,
                project_limit: 5,
            },
            Plan::Pro => PlanLimits {
                seat_limit: 25,
                project_limit: 50,
            },
            Plan::Business => PlanLimits {
                seat_limit: 100,
                project_limit: 500,
            },
            Plan::Lifetime => PlanLimits {
                seat_limit: 25,
                project_limit: 50,
            },
        }
    }
}

/// Subscription lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<SubscriptionStatus> {
        match s {
            "trialing" => Some(SubscriptionStatus::Trialing),
            "active" => Some(SubscriptionStatus::Active),
            "past_due" => Some(SubscriptionStatus::PastDue),
            "canceled" => Some(SubscriptionStatus::Canceled),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reconciled subscription record, one per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub user_id: Uuid,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub stripe_subscription_id: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub stripe_price_id: Option<String>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

/// Upsert payload for a subscription record (keyed on user id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpsert {
    pub user_id: Uuid,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub stripe_subscription_id: String,
    pub stripe_customer_id: String,
    pub stripe_price_id: String,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub trial_ends_at: Option<DateTime<Utc>>,
}
