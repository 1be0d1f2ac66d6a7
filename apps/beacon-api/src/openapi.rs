//! OpenAPI document assembly and serving.

use axum::Json;
use utoipa::OpenApi;

use beacon_webhooks::error::ErrorResponse;
use beacon_webhooks::handlers::register;
use beacon_webhooks::models::{RegisterWebhookRequest, RegisterWebhookResponse};

/// Aggregated OpenAPI documentation for the beacon API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beacon API",
        description = "Webhook subscriber registration and periodic signed event delivery"
    ),
    paths(register::register_webhook_handler),
    components(schemas(RegisterWebhookRequest, RegisterWebhookResponse, ErrorResponse)),
    tags((name = "Webhooks", description = "Webhook subscriber registration"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
