// POST /api/validate: collect Reddit discussion and score a problem statement.
//
// 200 {status: "success", results} when collection ran, even if nothing was
// found or analysis failed (results is then {}).
// 500 {status: "error", message} when the Reddit client can't connect.
// Malformed bodies get axum's rejection status with the same error shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::collector::Collector;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Explicit subreddits skip keyword resolution
    #[serde(default)]
    pub subreddits: Option<Vec<String>>,
}

pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected validation request");
            return api_error(rejection.status(), &rejection.body_text());
        }
    };

    let source = match state.connector.connect().await {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "Could not connect to Reddit");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    let collector = Collector::new(source.as_ref(), state.collector_config.clone());
    let collection = collector
        .run(request.subreddits.as_deref(), &request.keywords)
        .await;

    info!(
        records = collection.records.len(),
        failures = collection.failures.len(),
        "Collected records for validation"
    );

    // NMF is CPU-bound; keep it off the async workers
    let validator = state.validator.clone();
    let statement = request.problem_statement;
    let records = collection.records;
    let outcome =
        tokio::task::spawn_blocking(move || validator.validate(&records, &statement)).await;

    let results = match outcome {
        Ok(Ok(result)) => serde_json::to_value(result).unwrap_or_else(|_| json!({})),
        Ok(Err(e)) => {
            warn!(error = %e, "Analysis failed, returning empty results");
            json!({})
        }
        Err(e) => {
            error!(error = %e, "Analysis task panicked");
            json!({})
        }
    };

    success(results)
}

fn success(results: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "results": results })),
    )
        .into_response()
}
