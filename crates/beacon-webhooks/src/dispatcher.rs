//! Periodic webhook dispatch loop.
//!
//! Wakes on a fixed interval, snapshots the registry, and POSTs a signed
//! event envelope to every registered subscriber, sequentially within the
//! tick. Failures are logged per subscriber and never abort the remainder of
//! a tick; there is no retry, no backoff, and no delivery history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::RwLock;

use crate::crypto;
use crate::error::WebhookError;
use crate::models::{EventEnvelope, Subscription};
use crate::registry::SubscriptionRegistry;

/// Default seconds between dispatch ticks.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the HMAC-SHA256 signature of the request body.
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

/// Header carrying the envelope timestamp (same value as the body field).
pub const TIMESTAMP_HEADER: &str = "webhook-timestamp";

/// Header carrying the unique id of one delivery attempt.
pub const DELIVERY_ID_HEADER: &str = "webhook-id";

/// Background dispatcher delivering signed events to all subscribers.
pub struct Dispatcher {
    registry: Arc<SubscriptionRegistry>,
    http_client: Client,
    interval: Duration,
    event_type: String,
    event_data: serde_json::Value,
    running: Arc<RwLock<bool>>,
}

impl Dispatcher {
    /// Create a dispatcher around a shared registry, with a shared HTTP
    /// client bounded by `timeout` per outbound request.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Internal` if the HTTP client cannot be built.
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        timeout: Duration,
    ) -> Result<Self, WebhookError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("beacon-webhooks/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WebhookError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            registry,
            http_client,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            event_type: "ping".to_string(),
            event_data: serde_json::json!({"text": "Hello webhook!"}),
            running: Arc::new(RwLock::new(false)),
        })
    }

    /// Set the dispatch interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the event type sent on each tick.
    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Set the event data sent on each tick.
    #[must_use]
    pub fn with_event_data(mut self, data: serde_json::Value) -> Self {
        self.event_data = data;
        self
    }

    /// Run the dispatch loop until `stop()` is called.
    ///
    /// Sleeps first, then dispatches: a freshly started process sends nothing
    /// until one full interval has elapsed. Registration proceeds
    /// concurrently; each tick works from its own registry snapshot.
    pub async fn start(&self) {
        *self.running.write().await = true;

        tracing::info!(
            target: "webhook_delivery",
            interval_secs = self.interval.as_secs(),
            event_type = %self.event_type,
            "Dispatcher started"
        );

        while *self.running.read().await {
            tokio::time::sleep(self.interval).await;

            if !*self.running.read().await {
                break;
            }

            self.dispatch_tick().await;
        }

        tracing::info!(target: "webhook_delivery", "Dispatcher stopped");
    }

    /// Stop the dispatch loop after the current tick.
    pub async fn stop(&self) {
        *self.running.write().await = false;
    }

    /// Attempt one delivery round to every currently registered subscriber.
    pub async fn dispatch_tick(&self) {
        let subscriptions = self.registry.snapshot().await;

        if subscriptions.is_empty() {
            tracing::debug!(
                target: "webhook_delivery",
                "No subscribers registered, skipping tick"
            );
            return;
        }

        tracing::debug!(
            target: "webhook_delivery",
            subscriber_count = subscriptions.len(),
            event_type = %self.event_type,
            "Dispatching event to subscribers"
        );

        for subscription in &subscriptions {
            self.deliver(subscription).await;
        }
    }

    /// Execute a single delivery attempt to one subscriber.
    ///
    /// One unreachable subscriber must not prevent delivery to the rest of
    /// the tick's snapshot, so every failure path logs and returns.
    async fn deliver(&self, subscription: &Subscription) {
        let envelope = EventEnvelope::now(&self.event_type, self.event_data.clone());

        let body = match serde_json::to_vec(&envelope) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(
                    target: "webhook_delivery",
                    url = %subscription.url,
                    error = %e,
                    "Failed to serialize event envelope"
                );
                return;
            }
        };

        // The signature covers the exact bytes sent as the request body.
        let signature = crypto::sign_payload(&subscription.secret, &body);
        let delivery_id = crypto::generate_delivery_id();

        let start = Instant::now();
        let result = self
            .http_client
            .post(&subscription.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, format!("sha256={signature}"))
            .header(TIMESTAMP_HEADER, &envelope.timestamp)
            .header(DELIVERY_ID_HEADER, &delivery_id)
            .body(body)
            .send()
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    tracing::info!(
                        target: "webhook_delivery",
                        url = %subscription.url,
                        delivery_id = %delivery_id,
                        status = status.as_u16(),
                        latency_ms,
                        "Webhook delivered"
                    );
                } else {
                    // Same terminal outcome as a transport failure: log, move on.
                    tracing::warn!(
                        target: "webhook_delivery",
                        url = %subscription.url,
                        delivery_id = %delivery_id,
                        status = status.as_u16(),
                        latency_ms,
                        "Webhook delivery failed"
                    );
                }
            }
            Err(e) => {
                let error_msg = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    format!("Connection failed: {e}")
                } else {
                    format!("Request error: {e}")
                };

                tracing::warn!(
                    target: "webhook_delivery",
                    url = %subscription.url,
                    delivery_id = %delivery_id,
                    latency_ms,
                    error = %error_msg,
                    "Webhook delivery failed"
                );
            }
        }
    }
}
