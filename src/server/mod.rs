//! Axum HTTP server — exposes the single `/api/generate` endpoint.
//!
//! `run()` drives the axum event loop; a [`CancellationToken`] is wired to
//! axum's graceful shutdown. The route is registered with `any()` so the
//! handler performs the method check itself and owns the 405 response shape.
//!
//! ## URL layout
//!
//! ```text
//! POST /api/generate
//! ```

mod api;

use std::sync::Arc;

use axum::{Router, routing::any};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;
use crate::generate::Generator;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into the handler via [`axum::extract::State`].
///
/// Cheap to clone — the generator is reference-counted and immutable.
#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<Generator>,
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/generate", any(api::generate))
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

pub async fn run(
    bind_addr: String,
    generator: Arc<Generator>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = build_router(ApiState { generator });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("http server shut down");
    Ok(())
}
