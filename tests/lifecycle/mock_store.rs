//! In-memory store and provider mocks for the lifecycle suite.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use sitecrew_lib::db::cleanup::{TablePurge, USER_OWNED_TABLES};
use sitecrew_lib::error::{AppError, AppResult};
use sitecrew_lib::models::role::RoleGuardOutcome;
use sitecrew_lib::models::{NewAuditEntry, Role, SubscriptionRecord, SubscriptionUpsert};
use sitecrew_lib::services::identity::IdentityAdmin;
use sitecrew_lib::services::stripe::{PaymentProvider, ProviderSubscription};
use sitecrew_lib::store::Store;

#[derive(Default)]
struct State {
    roles: HashMap<Uuid, Vec<Role>>,
    profiles: HashSet<Uuid>,
    customers: HashMap<Uuid, String>,
    subscriptions: HashMap<Uuid, SubscriptionRecord>,
    mirror: HashMap<Uuid, (String, String)>,
    audits: Vec<NewAuditEntry>,
}

/// In-memory [`Store`] with the same guarded-deletion semantics as the
/// Postgres implementation.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    /// Panic if any role query runs; used to prove validation happens first.
    panic_on_role_query: bool,
    /// Tables whose purge should fail, by name.
    failing_tables: HashSet<&'static str>,
    /// Fail every audit insert.
    fail_audit: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panicking_on_role_queries() -> Self {
        Self {
            panic_on_role_query: true,
            ..Self::default()
        }
    }

    pub fn with_failing_table(mut self, table: &'static str) -> Self {
        self.failing_tables.insert(table);
        self
    }

    pub fn with_failing_audit(mut self) -> Self {
        self.fail_audit = true;
        self
    }

    pub fn add_user(&self, user_id: Uuid, roles: &[Role]) {
        let mut state = self.state.lock().unwrap();
        state.roles.insert(user_id, roles.to_vec());
        state.profiles.insert(user_id);
    }

    pub fn add_customer(&self, user_id: Uuid, customer_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.customers.insert(user_id, customer_id.to_string());
    }

    pub fn add_subscription(&self, record: SubscriptionRecord) {
        let mut state = self.state.lock().unwrap();
        state.subscriptions.insert(record.user_id, record);
    }

    pub fn roles_of(&self, user_id: Uuid) -> Vec<Role> {
        let state = self.state.lock().unwrap();
        state.roles.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn has_profile(&self, user_id: Uuid) -> bool {
        self.state.lock().unwrap().profiles.contains(&user_id)
    }

    pub fn subscription_of(&self, user_id: Uuid) -> Option<SubscriptionRecord> {
        self.state.lock().unwrap().subscriptions.get(&user_id).cloned()
    }

    pub fn mirror_of(&self, user_id: Uuid) -> Option<(String, String)> {
        self.state.lock().unwrap().mirror.get(&user_id).cloned()
    }

    pub fn audit_entries(&self) -> Vec<NewAuditEntry> {
        self.state.lock().unwrap().audits.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn has_role(&self, user_id: Uuid, role: Role) -> AppResult<bool> {
        assert!(!self.panic_on_role_query, "role store queried");
        let state = self.state.lock().unwrap();
        Ok(state
            .roles
            .get(&user_id)
            .map(|roles| roles.contains(&role))
            .unwrap_or(false))
    }

    async fn count_role_holders(&self, role: Role) -> AppResult<u64> {
        assert!(!self.panic_on_role_query, "role store queried");
        let state = self.state.lock().unwrap();
        Ok(state
            .roles
            .values()
            .filter(|roles| roles.contains(&role))
            .count() as u64)
    }

    async fn delete_roles_guarded(&self, target: Uuid) -> AppResult<RoleGuardOutcome> {
        assert!(!self.panic_on_role_query, "role store queried");
        let mut state = self.state.lock().unwrap();
        let held = state.roles.get(&target).cloned().unwrap_or_default();

        for role in Role::PRIVILEGED {
            if !held.contains(&role) {
                continue;
            }
            let holders = state
                .roles
                .values()
                .filter(|roles| roles.contains(&role))
                .count();
            if holders <= 1 {
                return Ok(RoleGuardOutcome::Blocked { role });
            }
        }

        state.roles.remove(&target);
        Ok(RoleGuardOutcome::Deleted { roles: held })
    }

    async fn record_audit(&self, entry: &NewAuditEntry) -> AppResult<()> {
        if self.fail_audit {
            return Err(AppError::Database("audit insert failed".to_string()));
        }
        self.state.lock().unwrap().audits.push(entry.clone());
        Ok(())
    }

    async fn purge_user_rows(&self, user_id: Uuid) -> Vec<TablePurge> {
        let mut state = self.state.lock().unwrap();
        USER_OWNED_TABLES
            .iter()
            .map(|&(table, _column)| {
                if self.failing_tables.contains(table) {
                    return TablePurge {
                        table,
                        result: Err(AppError::Database("connection reset".to_string())),
                    };
                }
                let rows = match table {
                    "subscriptions" => state.subscriptions.remove(&user_id).map(|_| 1).unwrap_or(0),
                    "stripe_customers" => state.customers.remove(&user_id).map(|_| 1).unwrap_or(0),
                    _ => 0,
                };
                TablePurge {
                    table,
                    result: Ok(rows),
                }
            })
            .collect()
    }

    async fn delete_profile(&self, user_id: Uuid) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        Ok(if state.profiles.remove(&user_id) { 1 } else { 0 })
    }

    async fn stripe_customer_id(&self, user_id: Uuid) -> AppResult<Option<String>> {
        Ok(self.state.lock().unwrap().customers.get(&user_id).cloned())
    }

    async fn upsert_subscription(&self, record: &SubscriptionUpsert) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.subscriptions.insert(
            record.user_id,
            SubscriptionRecord {
                user_id: record.user_id,
                plan: record.plan.clone(),
                status: record.status,
                stripe_subscription_id: Some(record.stripe_subscription_id.clone()),
                stripe_customer_id: Some(record.stripe_customer_id.clone()),
                stripe_price_id: Some(record.stripe_price_id.clone()),
                current_period_start: Some(record.current_period_start),
                current_period_end: Some(record.current_period_end),
                trial_ends_at: record.trial_ends_at,
            },
        );
        Ok(())
    }

    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>> {
        Ok(self.state.lock().unwrap().subscriptions.get(&user_id).cloned())
    }

    async fn update_entitlement_mirror(
        &self,
        user_id: Uuid,
        status: &str,
        plan: &str,
    ) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        state
            .mirror
            .insert(user_id, (status.to_string(), plan.to_string()));
        Ok(if state.profiles.contains(&user_id) { 1 } else { 0 })
    }
}

/// Identity-provider mock recording delete calls.
#[derive(Default)]
pub struct MockIdentity {
    pub deleted: Mutex<Vec<Uuid>>,
    fail: bool,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            deleted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn deleted_ids(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityAdmin for MockIdentity {
    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Upstream(
                "Identity provider returned 500".to_string(),
            ));
        }
        self.deleted.lock().unwrap().push(user_id);
        Ok(())
    }
}

/// Payment-provider mock serving a fixed subscription per customer id.
#[derive(Default)]
pub struct MockPayments {
    subscriptions: Mutex<HashMap<String, ProviderSubscription>>,
    pub queried: Mutex<Vec<String>>,
}

impl MockPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subscription(&self, customer_id: &str, subscription: ProviderSubscription) {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(customer_id.to_string(), subscription);
    }

    pub fn queried_customers(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPayments {
    async fn latest_active_subscription(
        &self,
        customer_id: &str,
    ) -> AppResult<Option<ProviderSubscription>> {
        self.queried.lock().unwrap().push(customer_id.to_string());
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .get(customer_id)
            .cloned())
    }
}
