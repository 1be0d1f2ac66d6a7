//! Handler for webhook subscriber registration.

use axum::{extract::State, Json};

use crate::error::{ApiResult, ErrorResponse};
use crate::models::{RegisterWebhookRequest, RegisterWebhookResponse};
use crate::router::AppState;

/// Register a webhook subscriber URL.
///
/// Generates a fresh signing secret for the URL and returns it in the
/// response. This is the only time the secret is ever exposed.
#[utoipa::path(
    post,
    path = "/register-webhook",
    tag = "Webhooks",
    request_body = RegisterWebhookRequest,
    responses(
        (status = 200, description = "Subscriber registered", body = RegisterWebhookResponse),
        (status = 400, description = "Invalid or restricted URL", body = ErrorResponse),
    )
)]
pub async fn register_webhook_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterWebhookRequest>,
) -> ApiResult<Json<RegisterWebhookResponse>> {
    let secret = state.registry.register(&request.url).await?;

    tracing::info!(
        target: "webhook_registry",
        url = %request.url,
        "Webhook subscriber registered"
    );

    Ok(Json(RegisterWebhookResponse::registered(
        request.url,
        secret,
    )))
}
