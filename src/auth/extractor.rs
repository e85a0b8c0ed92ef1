//! Actix-web extractors for bearer-credential authentication.
//!
//! Two extractors share the same verification path but answer differently
//! on failure: the account routes report 401, while the billing routes'
//! public contract folds credential failures into 400.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use std::future::{ready, Ready};

use super::TokenVerifier;
use crate::error::ErrorResponse;
use crate::models::AuthenticatedUser;

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorResponse {
            error: self.code.to_string(),
            message: self.message.clone(),
        })
    }
}

/// Verify the request's bearer credential. Returns the failure message
/// only; each extractor attaches its own status code.
fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, String> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| "Internal configuration error".to_string())?;

    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| {
            "Missing bearer credential. Provide an Authorization header.".to_string()
        })?;

    verifier
        .verify(token)
        .map_err(|_| "Invalid or expired credential".to_string())
}

/// Extractor that requires a verified bearer credential; failures are 401.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: BearerAuth) -> impl Responder {
///     // auth.user is the verified identity
/// }
/// ```
pub struct BearerAuth {
    pub user: AuthenticatedUser,
}

impl FromRequest for BearerAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authenticate(req)
                .map(|user| BearerAuth { user })
                .map_err(|message| AuthError {
                    status: StatusCode::UNAUTHORIZED,
                    code: "UNAUTHORIZED",
                    message,
                }),
        )
    }
}

/// Billing-route variant of [`BearerAuth`]. The billing endpoints answer
/// 200 for every defined outcome and 400 for everything else, credential
/// failures included.
pub struct BillingAuth {
    pub user: AuthenticatedUser,
}

impl FromRequest for BillingAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authenticate(req)
                .map(|user| BillingAuth { user })
                .map_err(|message| AuthError {
                    status: StatusCode::BAD_REQUEST,
                    code: "INVALID_CREDENTIAL",
                    message,
                }),
        )
    }
}
