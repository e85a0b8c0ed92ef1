//! Service layer: orchestration and external-provider clients.

pub mod account_deletion;
pub mod audit;
pub mod entitlement;
pub mod identity;
pub mod stripe;
pub mod subscription_sync;

pub use account_deletion::{delete_account, DeletionReport};
pub use entitlement::{entitlements_for, Entitlements};
pub use identity::{AuthAdminClient, IdentityAdmin};
pub use stripe::{PaymentProvider, ProviderSubscription, StripeClient};
pub use subscription_sync::{sync_subscription, SyncOutcome};
