//! Request, response, and wire types for webhook registration and delivery.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered webhook subscription: delivery URL plus its signing secret.
///
/// The URL is the unique key; re-registering the same URL replaces the secret.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub url: String,
    pub secret: String,
}

/// Request body for `POST /register-webhook`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterWebhookRequest {
    /// Absolute HTTP/HTTPS URL that will receive deliveries.
    pub url: String,
}

/// Response body for a successful registration.
///
/// The secret appears here exactly once; it cannot be read back through any
/// later operation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterWebhookResponse {
    pub status: String,
    pub url: String,
    pub secret: String,
}

impl RegisterWebhookResponse {
    /// Build the standard `"registered"` response.
    #[must_use]
    pub fn registered(url: String, secret: String) -> Self {
        Self {
            status: "registered".to_string(),
            url,
            secret,
        }
    }
}

/// JSON body of one webhook delivery.
///
/// Constructed fresh per delivery attempt and discarded once the request
/// completes. The serialized bytes of this struct are the exact buffer that
/// gets signed and transmitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: String,
    pub data: serde_json::Value,
}

impl EventEnvelope {
    /// Build an envelope stamped with the current UTC time.
    #[must_use]
    pub fn now(event_type: &str, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            timestamp: format_timestamp(),
            data,
        }
    }
}

/// Current UTC time as ISO-8601 with microsecond precision and `Z` suffix,
/// e.g. `2026-08-06T09:15:42.123456Z`. The same string goes into the envelope
/// body and the `webhook-timestamp` header.
#[must_use]
pub fn format_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
