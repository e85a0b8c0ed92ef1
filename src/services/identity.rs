//! Identity-provider admin API client.
//!
//! Deleting the identity itself is the authoritative step of an account
//! deletion: everything before it is reversible-by-recreation cleanup, so a
//! failure here aborts the operation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthSettings;
use crate::error::{AppError, AppResult};

/// HTTP connect timeout for admin API calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout for admin API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Administrative operations against the identity provider.
#[async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Permanently delete the user at the identity provider.
    async fn delete_user(&self, user_id: Uuid) -> AppResult<()>;
}

/// reqwest-backed client for the identity provider's admin API.
pub struct AuthAdminClient {
    admin_url: String,
    service_key: SecretString,
    http_client: reqwest::Client,
}

impl AuthAdminClient {
    pub fn new(settings: &AuthSettings) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            admin_url: settings.admin_url.trim_end_matches('/').to_string(),
            service_key: settings.service_key.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl IdentityAdmin for AuthAdminClient {
    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let url = format!("{}/admin/users/{}", self.admin_url, user_id);

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(self.service_key.expose_secret())
            .header("apikey", self.service_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider delete call failed: {}", e);
                AppError::Upstream("Identity provider request failed".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(
                user_id = %user_id,
                status = %status,
                "Identity provider refused user deletion"
            );
            return Err(AppError::Upstream(format!(
                "Identity provider returned {}",
                status
            )));
        }

        info!(user_id = %user_id, "Identity deleted at provider");
        Ok(())
    }
}
