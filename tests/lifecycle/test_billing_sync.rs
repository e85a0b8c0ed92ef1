//! Subscription reconciliation against the mocked payment provider.

use uuid::Uuid;

use sitecrew_lib::error::AppError;
use sitecrew_lib::models::{Role, SubscriptionStatus};
use sitecrew_lib::services::stripe::ProviderSubscription;
use sitecrew_lib::services::{sync_subscription, SyncOutcome};

use crate::mock_store::{MemoryStore, MockPayments};

fn provider_subscription(lookup_key: Option<&str>, metadata_plan: Option<&str>) -> ProviderSubscription {
    ProviderSubscription {
        id: "sub_123".to_string(),
        customer_id: "cus_123".to_string(),
        price_id: "price_123".to_string(),
        price_lookup_key: lookup_key.map(str::to_string),
        metadata_plan: metadata_plan.map(str::to_string),
        current_period_start: 1_700_000_000,
        current_period_end: 1_702_592_000,
    }
}

#[tokio::test]
async fn test_no_customer_mapping() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(outcome, SyncOutcome::NoCustomer);
    // The provider is never asked about a user without a customer mapping.
    assert!(payments.queried_customers().is_empty());
    assert!(store.subscription_of(user).is_none());
}

#[tokio::test]
async fn test_no_active_subscription() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(outcome, SyncOutcome::NoActiveSubscription);
    assert_eq!(payments.queried_customers(), vec!["cus_123".to_string()]);
    assert!(store.subscription_of(user).is_none());
}

#[tokio::test]
async fn test_sync_from_lookup_key() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_user(user, &[Role::Member]);
    store.add_customer(user, "cus_123");
    payments.add_subscription("cus_123", provider_subscription(Some("sitecrew_pro_monthly"), None));

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            plan: "pro".to_string()
        }
    );

    let record = store.subscription_of(user).unwrap();
    assert_eq!(record.plan, "pro");
    assert_eq!(record.status, SubscriptionStatus::Active);
    assert_eq!(record.stripe_subscription_id.as_deref(), Some("sub_123"));
    assert_eq!(record.stripe_price_id.as_deref(), Some("price_123"));
    assert_eq!(record.trial_ends_at, None);

    // The profile mirror follows the reconciled record.
    assert_eq!(
        store.mirror_of(user),
        Some(("active".to_string(), "pro".to_string()))
    );
}

#[tokio::test]
async fn test_period_boundaries_are_second_precision() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");
    payments.add_subscription("cus_123", provider_subscription(Some("sitecrew_pro_monthly"), None));

    sync_subscription(&store, &payments, user).await.unwrap();

    let record = store.subscription_of(user).unwrap();
    let start = record.current_period_start.unwrap();
    let end = record.current_period_end.unwrap();
    // Provider epochs are seconds; a record stored from raw seconds as
    // milliseconds would land in January 1970.
    assert_eq!(start.timestamp(), 1_700_000_000);
    assert_eq!(end.timestamp(), 1_702_592_000);
    assert!(start.timestamp_millis() == 1_700_000_000_000);
}

#[tokio::test]
async fn test_metadata_plan_fallback() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");
    payments.add_subscription(
        "cus_123",
        provider_subscription(None, Some("sitecrew_business_yearly")),
    );

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            plan: "business".to_string()
        }
    );
}

#[tokio::test]
async fn test_lookup_key_wins_over_metadata() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");
    payments.add_subscription(
        "cus_123",
        provider_subscription(Some("sitecrew_starter_monthly"), Some("sitecrew_pro_monthly")),
    );

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            plan: "starter".to_string()
        }
    );
}

#[tokio::test]
async fn test_subscription_without_plan_information_fails() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");
    payments.add_subscription("cus_123", provider_subscription(None, None));

    let err = sync_subscription(&store, &payments, user).await.unwrap_err();

    assert!(matches!(err, AppError::Upstream(_)));
    assert!(store.subscription_of(user).is_none());
}

#[tokio::test]
async fn test_sync_without_profile_row_still_succeeds() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    // Customer mapping exists but the profile row is gone; the mirror
    // update matches zero rows and the sync must still complete.
    store.add_customer(user, "cus_123");
    payments.add_subscription("cus_123", provider_subscription(Some("sitecrew_pro_monthly"), None));

    let outcome = sync_subscription(&store, &payments, user).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            plan: "pro".to_string()
        }
    );
    assert!(store.subscription_of(user).is_some());
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let store = MemoryStore::new();
    let payments = MockPayments::new();
    let user = Uuid::new_v4();
    store.add_customer(user, "cus_123");
    payments.add_subscription("cus_123", provider_subscription(Some("sitecrew_pro_monthly"), None));

    let first = sync_subscription(&store, &payments, user).await.unwrap();
    let record_after_first = store.subscription_of(user).unwrap();

    let second = sync_subscription(&store, &payments, user).await.unwrap();
    let record_after_second = store.subscription_of(user).unwrap();

    assert_eq!(first, second);
    assert_eq!(record_after_first, record_after_second);
}
