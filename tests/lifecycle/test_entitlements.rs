//! Entitlement reads: plan limits, trial state and the free-tier fallback.

use chrono::{Duration, Utc};
use uuid::Uuid;

use sitecrew_lib::models::{SubscriptionRecord, SubscriptionStatus, FREE_TIER_LIMITS};
use sitecrew_lib::services::entitlements_for;

use crate::mock_store::MemoryStore;

fn record(user_id: Uuid, plan: &str, status: SubscriptionStatus) -> SubscriptionRecord {
    SubscriptionRecord {
        user_id,
        plan: plan.to_string(),
        status,
        stripe_subscription_id: Some("sub_123".to_string()),
        stripe_customer_id: Some("cus_123".to_string()),
        stripe_price_id: Some("price_123".to_string()),
        current_period_start: Some(Utc::now() - Duration::days(10)),
        current_period_end: Some(Utc::now() + Duration::days(20)),
        trial_ends_at: None,
    }
}

#[tokio::test]
async fn test_no_record_is_free_tier() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();

    let e = entitlements_for(&store, user).await.unwrap();

    assert_eq!(e.plan, None);
    assert_eq!(e.status, None);
    assert!(!e.is_paid());
    assert!(!e.trial_active);
    assert_eq!(e.seat_limit, FREE_TIER_LIMITS.seat_limit);
    assert_eq!(e.project_limit, FREE_TIER_LIMITS.project_limit);
}

#[tokio::test]
async fn test_active_pro_limits() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store.add_subscription(record(user, "pro", SubscriptionStatus::Active));

    let e = entitlements_for(&store, user).await.unwrap();

    assert_eq!(e.plan.as_deref(), Some("pro"));
    assert!(e.is_paid());
    assert_eq!(e.seat_limit, 25);
    assert_eq!(e.project_limit, 50);
}

#[tokio::test]
async fn test_trialing_with_future_end() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let mut rec = record(user, "starter", SubscriptionStatus::Trialing);
    rec.trial_ends_at = Some(Utc::now() + Duration::days(10));
    store.add_subscription(rec);

    let e = entitlements_for(&store, user).await.unwrap();

    assert!(e.trial_active);
    assert!(e.is_paid());
    // Just under ten days remain.
    assert!((9..=10).contains(&e.trial_days_left));
}

#[tokio::test]
async fn test_expired_trial_is_inactive() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let mut rec = record(user, "starter", SubscriptionStatus::Trialing);
    rec.trial_ends_at = Some(Utc::now() - Duration::days(1));
    store.add_subscription(rec);

    let e = entitlements_for(&store, user).await.unwrap();

    assert!(!e.trial_active);
    assert_eq!(e.trial_days_left, 0);
}

#[tokio::test]
async fn test_trialing_without_end_date_is_inactive() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store.add_subscription(record(user, "starter", SubscriptionStatus::Trialing));

    let e = entitlements_for(&store, user).await.unwrap();

    assert!(!e.trial_active);
    assert_eq!(e.trial_days_left, 0);
}

#[tokio::test]
async fn test_unknown_plan_gets_free_tier_limits() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    // A plan name retired from the limits table.
    store.add_subscription(record(user, "enterprise", SubscriptionStatus::Active));

    let e = entitlements_for(&store, user).await.unwrap();

    // The gate still answers, with conservative limits, and preserves the
    // stored plan name for display.
    assert_eq!(e.plan.as_deref(), Some("enterprise"));
    assert_eq!(e.seat_limit, FREE_TIER_LIMITS.seat_limit);
    assert_eq!(e.project_limit, FREE_TIER_LIMITS.project_limit);
}

#[tokio::test]
async fn test_canceled_is_not_paid() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store.add_subscription(record(user, "pro", SubscriptionStatus::Canceled));

    let e = entitlements_for(&store, user).await.unwrap();

    assert_eq!(e.status, Some(SubscriptionStatus::Canceled));
    assert!(!e.is_paid());
    // Limits still reflect the plan; enforcement of lapsed payment is a
    // policy decision made by callers via is_paid().
    assert_eq!(e.seat_limit, 25);
}

#[tokio::test]
async fn test_lifetime_plan() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store.add_subscription(record(user, "lifetime", SubscriptionStatus::Active));

    let e = entitlements_for(&store, user).await.unwrap();

    assert!(e.is_paid());
    assert_eq!(e.seat_limit, 25);
    assert_eq!(e.project_limit, 50);
}
