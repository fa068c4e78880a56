//! API routes

use super::AppState;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use secscope_application::AnalyzeInput;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

type AppStateArc = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunToolRequest {
    pub tool: String,
    pub content: String,
    pub language: Option<String>,
}

// ============================================================================
// Analysis Routes
// ============================================================================

pub fn analyze_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/debug/run_tool", post(run_tool))
}

/// Route a natural-language query to a tool.
async fn analyze(State(state): State<AppStateArc>, Json(req): Json<AnalyzeRequest>) -> Json<Value> {
    let token = Some(state.shutdown.child_token());
    let output = state.router.route(&req.query, &token).await;
    info!(
        "/analyze -> {} ({})",
        output.decision.tool, output.decision.basis
    );

    Json(json!({ "success": true, "result": output.envelope() }))
}

/// Run one tool directly, bypassing the router.
async fn run_tool(
    State(state): State<AppStateArc>,
    Json(req): Json<RunToolRequest>,
) -> Json<Value> {
    let input = match AnalyzeInput::parse(&req.tool, req.content) {
        Ok(input) => input.with_language(req.language),
        Err(e) => {
            warn!("/debug/run_tool rejected: {}", e);
            return Json(json!({ "success": false, "error": format!("{}.", e) }));
        }
    };

    let token = Some(state.shutdown.child_token());
    match state.analyze.execute(input, &token).await {
        Ok(resolution) => Json(json!({ "success": true, "result": resolution.result })),
        Err(e) => Json(json!({ "success": false, "error": e.to_string() })),
    }
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
