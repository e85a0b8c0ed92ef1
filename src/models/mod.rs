//! Domain models for the Sitecrew account server.

pub mod audit;
pub mod billing;
pub mod identity;
pub mod role;

// Re-export commonly used types
pub use audit::{AuditAction, NewAuditEntry};
pub use billing::{
    BillingMode, Plan, PlanLimits, SubscriptionRecord, SubscriptionStatus, SubscriptionUpsert,
    FREE_TIER_LIMITS,
};
pub use identity::{AccessTokenClaims, AuthenticatedUser};
pub use role::Role;
