//! In-memory subscription registry mapping delivery URL to signing secret.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::crypto;
use crate::error::WebhookError;
use crate::models::Subscription;
use crate::validation;

/// Shared registry of webhook subscriptions.
///
/// Each URL maps to exactly one secret; re-registering a URL replaces the
/// previous secret (last write wins). Entries live for the process lifetime;
/// there is no deregistration.
///
/// Reads and writes go through an async `RwLock` so the registration path and
/// the dispatch loop can share the map across runtime worker threads.
pub struct SubscriptionRegistry {
    entries: RwLock<HashMap<String, String>>,
    block_internal: bool,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            block_internal: false,
        }
    }

    /// Reject private/internal destination hosts at registration time.
    #[must_use]
    pub fn with_block_internal(mut self, block: bool) -> Self {
        self.block_internal = block;
        self
    }

    /// Register a subscriber URL and return its freshly generated secret.
    ///
    /// The secret is returned to the caller exactly once; internally it is
    /// retained only for signing deliveries. An invalid URL leaves the
    /// registry untouched.
    pub async fn register(&self, url: &str) -> Result<String, WebhookError> {
        validation::validate_webhook_url(url, self.block_internal)?;

        let secret = crypto::generate_secret();

        let mut entries = self.entries.write().await;
        if entries.insert(url.to_string(), secret.clone()).is_some() {
            tracing::info!(
                target: "webhook_registry",
                url = %url,
                "Re-registered subscriber, previous secret replaced"
            );
        }

        Ok(secret)
    }

    /// Stable snapshot of the current subscriptions for one dispatch tick.
    ///
    /// Iteration order is unspecified and not guaranteed stable across ticks.
    pub async fn snapshot(&self) -> Vec<Subscription> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(url, secret)| Subscription {
                url: url.clone(),
                secret: secret.clone(),
            })
            .collect()
    }

    /// Number of registered subscribers.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the registry has no subscribers.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
