//! HTTP surface of the review relay.
//!
//! One route, `POST /webhook`, plus request-id tagging. All webhook logic
//! lives in `mr-reviewer`; this crate maps its outcome to HTTP.

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use axum::{Router, middleware, routing::post};
use mr_reviewer::ReviewRelay;
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState, error_handler::AppError, middleware_layer::request_id::request_id,
    routes::webhook::webhook_route::webhook_route,
};

const DEFAULT_PORT: &str = "8080";

/// Builds the router over a ready relay. Used by [`start`] and by tests.
pub fn build_router(relay: ReviewRelay) -> Router {
    let state = Arc::new(AppState::new(relay));

    Router::new()
        .route("/webhook", post(webhook_route))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// `API_ADDRESS` if set, else `0.0.0.0:$PORT` (port 8080 by default).
pub fn listen_address() -> String {
    env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| {
            let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.into());
            format!("0.0.0.0:{port}")
        })
}

/// Binds and serves until Ctrl+C.
pub async fn start(relay: ReviewRelay) -> Result<(), AppError> {
    let addr = listen_address();
    let app = build_router(relay);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "webhook relay listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
