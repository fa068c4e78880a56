//! HTTP request boundary
//!
//! Thin axum layer over the application use cases. Every handler answers
//! with a JSON body; tool-level faults are carried inside that body rather
//! than as HTTP errors.

mod routes;

use axum::Router;
use secscope_application::{AnalyzeContentUseCase, RouteQueryUseCase};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub router: RouteQueryUseCase,
    pub analyze: AnalyzeContentUseCase,
    /// Cancelled on shutdown; in-flight requests use child tokens.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(router: RouteQueryUseCase, analyze: AnalyzeContentUseCase) -> Self {
        Self {
            router,
            analyze,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

/// Build the router with all endpoints.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::analyze_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until the state's shutdown token is cancelled.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let shutdown = state.shutdown.clone();
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
