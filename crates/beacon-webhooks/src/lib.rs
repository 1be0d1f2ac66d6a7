//! Webhook registration and periodic signed event delivery.
//!
//! Maintains an in-memory registry of subscriber URLs with per-subscriber
//! signing secrets, and a background dispatcher that fans out HMAC-SHA256
//! signed event notifications to every registered subscriber on a fixed
//! interval. Delivery is best-effort: failures are logged per subscriber and
//! never retried.

pub mod crypto;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod router;
pub mod validation;

pub use dispatcher::Dispatcher;
pub use error::WebhookError;
pub use models::EventEnvelope;
pub use registry::SubscriptionRegistry;
pub use router::{webhooks_router, AppState};
