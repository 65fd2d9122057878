//! HTTP client for the content store's query endpoint.
//!
//! Issues one bearer-authenticated GET per lookup, filtering on an exact
//! match of the tracking field and projecting exactly the six delivery
//! fields. The tracking id travels as a bound query parameter, never
//! spliced into the query text.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use voxtrack_core::{DeliveryRecord, TrackingId};

use crate::error::{LookupError, Result};

/// GROQ projection fetching exactly the six delivery fields.
///
/// The tracking id binds as `$trackingId`. Normalization already restricts
/// the value to `[A-Z0-9]`, so binding is a robustness measure, not a
/// behavior change.
const DELIVERY_QUERY: &str = "*[_type == 'delivery' && trackingNumber == $trackingId]{\
\"tracking_id\": trackingNumber,\
\"status\": status,\
\"customerName\": customerName,\
\"customerPhone\": customerPhone,\
\"estimatedDelivery\": estimatedDelivery,\
\"issueMessage\": issueMessage\
}";

/// Configuration for the store lookup client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Content-store project identifier.
    pub project_id: String,
    /// Dataset queried for delivery records.
    pub dataset: String,
    /// Bearer token for the query API.
    pub api_token: String,
    /// Store API version date.
    pub api_version: String,
    /// Base URL override for self-hosted stores and tests. When unset the
    /// hosted `https://{project_id}.api.sanity.io` endpoint is used.
    pub api_base: Option<String>,
    /// Timeout for one query request.
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_token: String::new(),
            api_version: "v2021-10-21".to_string(),
            api_base: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    /// Full URL of the query endpoint for the configured dataset.
    pub fn query_url(&self) -> String {
        let base = match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.project_id),
        };
        format!("{}/{}/data/query/{}", base, self.api_version, self.dataset)
    }
}

/// Query-result wrapper returned by the store.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Vec<DeliveryRecord>,
}

/// Client for delivery lookups against the content store.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl LookupClient {
    /// Creates a client with connection pooling and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("voxtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                LookupError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Finds delivery records matching a normalized tracking id, fail-soft.
    ///
    /// Any transport failure, timeout, non-2xx status, or malformed response
    /// is logged and degrades to an empty list: a store outage presents to
    /// the caller exactly as "no delivery found", never as an error. Result
    /// order is whatever the store returns.
    #[instrument(name = "delivery_lookup", skip(self), fields(tracking_id = %tracking_id))]
    pub async fn find_deliveries(&self, tracking_id: &TrackingId) -> Vec<DeliveryRecord> {
        match self.query(tracking_id).await {
            Ok(records) => {
                debug!(count = records.len(), "store query completed");
                records
            },
            Err(e) => {
                warn!(error = %e, "store query failed, degrading to empty result");
                Vec::new()
            },
        }
    }

    /// Issues the query and surfaces failures; the fail-soft policy lives in
    /// [`LookupClient::find_deliveries`].
    async fn query(&self, tracking_id: &TrackingId) -> Result<Vec<DeliveryRecord>> {
        // String-typed GROQ parameters arrive JSON-encoded.
        let bound_id = serde_json::Value::String(tracking_id.as_str().to_string()).to_string();

        let response = self
            .client
            .get(self.config.query_url())
            .query(&[("query", DELIVERY_QUERY), ("$trackingId", bound_id.as_str())])
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::timeout(self.config.timeout.as_secs())
                } else {
                    LookupError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| LookupError::network(e.to_string()))?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }
}
