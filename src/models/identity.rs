//! Authenticated identity models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user identity verified from a bearer credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Claims carried by identity-provider access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the user's id
    pub sub: String,
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
}
