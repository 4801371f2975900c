// Web server: axum JSON API in front of the collect-and-validate pipeline.
//
// Each validation request connects its own Reddit client and runs its own
// collector. The only shared state is read-only: the connector, the
// collector caps, and the analysis models.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::ProblemValidator;
use crate::collector::source::SourceConnector;
use crate::collector::CollectorConfig;
use crate::config::Config;
use crate::reddit::RedditConnector;

pub mod handlers;

/// Shared application state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn SourceConnector>,
    pub collector_config: CollectorConfig,
    pub validator: Arc<ProblemValidator>,
}

impl AppState {
    /// Production state: Reddit connector and default models.
    pub fn from_config(config: Config) -> Result<Self> {
        Ok(Self {
            connector: Arc::new(RedditConnector::new(config)),
            collector_config: CollectorConfig::default(),
            validator: Arc::new(ProblemValidator::new()?),
        })
    }
}

/// Start the axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Problem validator API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/validate", post(handlers::validate::validate))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check. Always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "status": "error", "message": message })),
    )
        .into_response()
}
