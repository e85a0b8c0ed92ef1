//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sitecrew Account Server",
        version = "0.3.0",
        description = "Account lifecycle and entitlement API: guarded account deletion, subscription reconciliation, entitlement reads"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Account endpoints
        api::account::delete_account,
        // Billing endpoints
        api::billing::verify_subscription,
        api::billing::get_entitlements,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Account
            api::account::DeleteAccountRequest,
            api::account::DeleteAccountResponse,
            // Billing
            api::billing::VerifySubscriptionResponse,
            services::entitlement::Entitlements,
            models::billing::SubscriptionStatus,
            models::billing::Plan,
            models::role::Role,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Account", description = "Account lifecycle"),
        (name = "Billing", description = "Subscription reconciliation and entitlements")
    )
)]
pub struct ApiDoc;
