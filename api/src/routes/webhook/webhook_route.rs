use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use mr_reviewer::WebhookRequest;
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::webhook::webhook_response::WebhookResponse,
};

/// `POST /webhook`: provider delivery entry point.
///
/// The body is taken as raw bytes so the signature is checked over exactly
/// what the provider signed. Routing, verification and review happen in
/// [`mr_reviewer::ReviewRelay::process`]; its errors become 400/403/422.
#[instrument(name = "webhook_route", skip_all, fields(body_len = body.len()))]
pub async fn webhook_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<WebhookResponse>)> {
    let request = WebhookRequest::new(headers, body);
    let message = state.relay.process(&request).await?;

    info!(%message, "webhook handled");
    Ok((StatusCode::OK, Json(WebhookResponse::processed(message))))
}
