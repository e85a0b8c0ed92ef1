//! Payment provider client.
//!
//! Minimal serde views over the provider's subscription listing; only the
//! fields reconciliation needs are deserialized.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::warn;

use crate::config::StripeSettings;
use crate::error::{AppError, AppResult};

/// HTTP connect timeout for provider calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout for provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A subscription as reported by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSubscription {
    pub id: String,
    pub customer_id: String,
    pub price_id: String,
    pub price_lookup_key: Option<String>,
    /// `plan` value from the subscription's metadata, if present
    pub metadata_plan: Option<String>,
    /// Unix seconds
    pub current_period_start: i64,
    /// Unix seconds
    pub current_period_end: i64,
}

/// Read access to the payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// The customer's most recent active subscription, if any.
    async fn latest_active_subscription(
        &self,
        customer_id: &str,
    ) -> AppResult<Option<ProviderSubscription>>;
}

/// reqwest-backed Stripe API client.
pub struct StripeClient {
    api_base: String,
    secret_key: SecretString,
    http_client: reqwest::Client,
}

impl StripeClient {
    /// Build a client, or `Configuration` error if no API key is set.
    pub fn new(settings: &StripeSettings) -> AppResult<Self> {
        let secret_key = settings
            .secret_key
            .clone()
            .ok_or_else(|| AppError::Configuration("STRIPE_SECRET_KEY is not set".to_string()))?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            secret_key,
            http_client,
        })
    }
}

/// Shared handle to the payment provider, present whether or not billing is
/// configured. Billing endpoints surface a configuration error instead of
/// failing at startup when no API key is set.
#[derive(Clone)]
pub struct PaymentGateway {
    inner: Option<std::sync::Arc<dyn PaymentProvider>>,
}

impl PaymentGateway {
    pub fn new(inner: Option<std::sync::Arc<dyn PaymentProvider>>) -> Self {
        Self { inner }
    }

    /// The configured provider, or a `Configuration` error.
    pub fn provider(&self) -> AppResult<&dyn PaymentProvider> {
        self.inner
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Payment provider is not configured".to_string()))
    }
}

// Wire types for GET /v1/subscriptions

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    data: Vec<SubscriptionObject>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionObject {
    id: String,
    customer: String,
    current_period_start: i64,
    current_period_end: i64,
    #[serde(default)]
    metadata: std::collections::HashMap<String, String>,
    items: SubscriptionItems,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItems {
    data: Vec<SubscriptionItem>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItem {
    price: Price,
}

#[derive(Debug, Deserialize)]
struct Price {
    id: String,
    lookup_key: Option<String>,
}


#[async_trait]
impl PaymentProvider for StripeClient {
    async fn latest_active_subscription(
        &self,
        customer_id: &str,
    ) -> AppResult<Option<ProviderSubscription>> {
        let url = format!("{}/v1/subscriptions", self.api_base);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.secret_key.expose_secret())
            .query(&[
                ("customer", customer_id),
                ("status", "active"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Payment provider request failed: {}", e);
                AppError::Upstream("Payment provider request failed".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(customer_id, status = %status, "Payment provider returned an error");
            return Err(AppError::Upstream(format!(
                "Payment provider returned {}",
                status
            )));
        }

        let list: SubscriptionList = response.json().await.map_err(|e| {
            warn!("Payment provider response could not be parsed: {}", e);
            AppError::Upstream("Payment provider response could not be parsed".to_string())
        })?;

        let Some(sub) = list.data.into_iter().next() else {
            return Ok(None);
        };

        let price = sub
            .items
            .data
            .into_iter()
            .next()
            .map(|item| item.price)
            .ok_or_else(|| {
                AppError::Upstream("Subscription has no price items".to_string())
            })?;

        Ok(Some(ProviderSubscription {
            id: sub.id,
            customer_id: sub.customer,
            price_id: price.id,
            price_lookup_key: price.lookup_key,
            metadata_plan: sub.metadata.get("plan").cloned(),
            current_period_start: sub.current_period_start,
            current_period_end: sub.current_period_end,
        }))
    }
}
