//! Billing endpoints: subscription verification and entitlement reads.

use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::BillingAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::entitlement::Entitlements;
use crate::services::stripe::PaymentGateway;
use crate::services::{entitlement, subscription_sync, SyncOutcome};
use crate::store::Store;

/// Response for the verification endpoint. All defined outcomes (including
/// "no customer" and "no active subscription") are HTTP 200.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifySubscriptionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reconcile the caller's subscription with the payment provider.
///
/// POST /api/v1/billing/verify
/// Authorization: bearer credential. Idempotent; safe to call repeatedly.
#[utoipa::path(
    post,
    path = "/api/v1/billing/verify",
    tag = "Billing",
    responses(
        (status = 200, description = "Reconciliation outcome", body = VerifySubscriptionResponse),
        (status = 400, description = "Invalid credential or payment provider not configured")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
#[post("/billing/verify")]
pub async fn verify_subscription(
    auth: BillingAuth,
    pool: web::Data<DbPool>,
    gateway: web::Data<PaymentGateway>,
) -> AppResult<HttpResponse> {
    let store: &dyn Store = pool.get_ref();
    let payments = gateway.provider()?;

    let outcome = subscription_sync::sync_subscription(store, payments, auth.user.id).await?;

    let response = match outcome {
        SyncOutcome::NoCustomer => VerifySubscriptionResponse {
            success: false,
            plan: None,
            status: None,
            message: Some("No customer found".to_string()),
        },
        SyncOutcome::NoActiveSubscription => VerifySubscriptionResponse {
            success: false,
            plan: None,
            status: None,
            message: Some("No active subscription".to_string()),
        },
        SyncOutcome::Synced { plan } => VerifySubscriptionResponse {
            success: true,
            plan: Some(plan),
            status: Some("active".to_string()),
            message: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Read the caller's entitlement state.
///
/// GET /api/v1/billing/entitlements
#[utoipa::path(
    get,
    path = "/api/v1/billing/entitlements",
    tag = "Billing",
    responses(
        (status = 200, description = "Entitlement state", body = Entitlements),
        (status = 400, description = "Invalid credential")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
#[get("/billing/entitlements")]
pub async fn get_entitlements(auth: BillingAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let store: &dyn Store = pool.get_ref();
    let entitlements = entitlement::entitlements_for(store, auth.user.id).await?;

    Ok(HttpResponse::Ok().json(entitlements))
}

/// Configure billing routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(verify_subscription).service(get_entitlements);
}
