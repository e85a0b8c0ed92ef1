//! Account lifecycle endpoints.

use actix_web::{delete, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::{account_deletion, IdentityAdmin};
use crate::store::Store;

/// Request body for account deletion.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteAccountRequest {
    /// Target user id (UUID v4)
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteAccountResponse {
    message: String,
}

/// Delete a user account and all owned data.
///
/// DELETE /api/v1/account
/// Authorization: bearer credential. Self-deletion is always permitted;
/// deleting another user requires the admin role. Deleting the sole holder
/// of a privileged role is refused.
#[utoipa::path(
    delete,
    path = "/api/v1/account",
    tag = "Account",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account deleted", body = DeleteAccountResponse),
        (status = 400, description = "Invalid user id"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Forbidden, including the last-admin safeguard"),
        (status = 500, description = "Identity provider failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
#[delete("/account")]
pub async fn delete_account(
    auth: BearerAuth,
    body: web::Json<DeleteAccountRequest>,
    pool: web::Data<DbPool>,
    identity: web::Data<dyn IdentityAdmin>,
) -> AppResult<HttpResponse> {
    let store: &dyn Store = pool.get_ref();

    account_deletion::delete_account(store, identity.as_ref(), &auth.user, &body.user_id).await?;

    Ok(HttpResponse::Ok().json(DeleteAccountResponse {
        message: "Account deleted".to_string(),
    }))
}

/// Configure account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(delete_account);
}
