//! Bearer-credential authentication.
//!
//! Access tokens are HS256 JWTs issued by the external identity provider;
//! this service only verifies them with the shared secret.

mod extractor;

pub use extractor::{BearerAuth, BillingAuth};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;

use crate::config::AuthSettings;
use crate::error::{AppError, AppResult};
use crate::models::{AccessTokenClaims, AuthenticatedUser};

/// Verifier for identity-provider access tokens, shared as app data.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        let decoding_key =
            DecodingKey::from_secret(settings.jwt_secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // Audience is provider-specific ("authenticated"); not part of our contract.
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify a bearer token and return the authenticated user.
    ///
    /// Detailed failures are logged server-side; callers get a generic 401.
    pub fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    tracing::warn!("Bearer token verification failed: {}", e);
                    AppError::Unauthenticated("Invalid or expired credential".to_string())
                })?;

        let id = uuid::Uuid::parse_str(&data.claims.sub).map_err(|_| {
            tracing::warn!("Bearer token subject is not a UUID");
            AppError::Unauthenticated("Invalid or expired credential".to_string())
        })?;

        Ok(AuthenticatedUser {
            id,
            email: data.claims.email,
        })
    }
}
