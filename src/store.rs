//! Storage seam used by the services.
//!
//! Services talk to this trait rather than to SeaORM directly so the
//! authorization, safeguard, and reconciliation logic can run against an
//! in-memory store in tests. `DbPool` is the production implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db;
use crate::db::cleanup::TablePurge;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::role::RoleGuardOutcome;
use crate::models::{NewAuditEntry, Role, SubscriptionRecord, SubscriptionUpsert};

#[async_trait]
pub trait Store: Send + Sync {
    /// Does the user hold the role? Uncached, current committed state.
    async fn has_role(&self, user_id: Uuid, role: Role) -> AppResult<bool>;

    /// System-wide holder count for a role.
    async fn count_role_holders(&self, role: Role) -> AppResult<u64>;

    /// Remove the target's role rows, blocking if the target is the sole
    /// holder of any privileged role. Count and delete are atomic.
    async fn delete_roles_guarded(&self, target: Uuid) -> AppResult<RoleGuardOutcome>;

    /// Append an audit entry.
    async fn record_audit(&self, entry: &NewAuditEntry) -> AppResult<()>;

    /// Best-effort per-table purge of user-owned rows; never short-circuits.
    async fn purge_user_rows(&self, user_id: Uuid) -> Vec<TablePurge>;

    /// Delete the user's profile row; returns rows removed.
    async fn delete_profile(&self, user_id: Uuid) -> AppResult<u64>;

    /// Resolve the payment-provider customer id for the user.
    async fn stripe_customer_id(&self, user_id: Uuid) -> AppResult<Option<String>>;

    /// Upsert the user's subscription record in a single statement.
    async fn upsert_subscription(&self, record: &SubscriptionUpsert) -> AppResult<()>;

    /// Read the user's reconciled subscription record.
    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>>;

    /// Update the profile's denormalized subscription fields. Returns the
    /// number of rows updated; zero means no profile row exists.
    async fn update_entitlement_mirror(
        &self,
        user_id: Uuid,
        status: &str,
        plan: &str,
    ) -> AppResult<u64>;
}

#[async_trait]
impl Store for DbPool {
    async fn has_role(&self, user_id: Uuid, role: Role) -> AppResult<bool> {
        db::roles::has_role(self.connection(), user_id, role).await
    }

    async fn count_role_holders(&self, role: Role) -> AppResult<u64> {
        db::roles::count_holders(self.connection(), role).await
    }

    async fn delete_roles_guarded(&self, target: Uuid) -> AppResult<RoleGuardOutcome> {
        db::roles::delete_roles_guarded(self.connection(), target).await
    }

    async fn record_audit(&self, entry: &NewAuditEntry) -> AppResult<()> {
        db::audit::insert(self.connection(), entry).await
    }

    async fn purge_user_rows(&self, user_id: Uuid) -> Vec<TablePurge> {
        db::cleanup::purge_user_rows(self.connection(), user_id).await
    }

    async fn delete_profile(&self, user_id: Uuid) -> AppResult<u64> {
        db::profiles::delete_profile(self.connection(), user_id).await
    }

    async fn stripe_customer_id(&self, user_id: Uuid) -> AppResult<Option<String>> {
        db::stripe_customers::find_customer_id(self.connection(), user_id).await
    }

    async fn upsert_subscription(&self, record: &SubscriptionUpsert) -> AppResult<()> {
        db::subscriptions::upsert(self.connection(), record).await
    }

    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>> {
        db::subscriptions::find_by_user(self.connection(), user_id).await
    }

    async fn update_entitlement_mirror(
        &self,
        user_id: Uuid,
        status: &str,
        plan: &str,
    ) -> AppResult<u64> {
        db::profiles::update_entitlement_mirror(self.connection(), user_id, status, plan).await
    }
}
