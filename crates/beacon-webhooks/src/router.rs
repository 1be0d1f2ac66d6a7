//! Axum router setup for webhook endpoints.

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::register;
use crate::registry::SubscriptionRegistry;

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SubscriptionRegistry>,
}

impl AppState {
    /// Create a new state around a shared registry.
    #[must_use]
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        Self { registry }
    }
}

/// Creates the webhook router with all routes.
pub fn webhooks_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/register-webhook",
            post(register::register_webhook_handler),
        )
        .with_state(state)
}
