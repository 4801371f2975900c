// HTTP API tests driven through the router with tower's oneshot.
//
// A fake SourceConnector stands in for Reddit so no request leaves the
// process.
#![cfg(feature = "web")]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use problem_validator::analysis::ProblemValidator;
use problem_validator::collector::source::{
    ContentSource, ReplyLimit, SourceConnector, SourceItem, SourceReply,
};
use problem_validator::collector::CollectorConfig;
use problem_validator::error::{ConfigError, ConnectError};
use problem_validator::web::{build_router, AppState};

struct CannedSource;

const POSTS: &[&str] = &[
    "Invoicing clients is a nightmare, the invoice software keeps crashing",
    "I hate chasing late invoice payments from clients every month",
    "Our invoice templates are broken and clients complain constantly",
    "Payroll software is frustrating and payroll taxes are confusing",
    "Running payroll by hand is painful and tax filing is a nightmare",
    "Inventory spreadsheets never match and stock tracking is awful",
    "Tracking inventory stock across stores is a total waste of time",
    "I love how easy the new scheduling tool makes staff shifts",
];

#[async_trait]
impl ContentSource for CannedSource {
    async fn search_groups(&self, keyword: &str, _limit: usize) -> Result<Vec<String>> {
        Ok(match keyword {
            "invoicing" => vec!["smallbusiness".to_string()],
            _ => vec![],
        })
    }

    async fn list_items(&self, group: &str, _limit: usize) -> Result<Vec<SourceItem>> {
        if group != "smallbusiness" {
            return Ok(vec![]);
        }
        Ok(POSTS
            .iter()
            .enumerate()
            .map(|(i, body)| SourceItem {
                id: format!("p{i}"),
                title: format!("Thread {i}"),
                body: body.to_string(),
                weight: 50,
                url: format!("https://www.reddit.com/comments/p{i}"),
                created_at: Utc::now(),
            })
            .collect())
    }

    async fn list_replies(&self, _item_id: &str, _limit: ReplyLimit) -> Result<Vec<SourceReply>> {
        Ok(vec![])
    }
}

struct CannedConnector;

#[async_trait]
impl SourceConnector for CannedConnector {
    async fn connect(&self) -> Result<Box<dyn ContentSource>, ConnectError> {
        Ok(Box::new(CannedSource))
    }
}

struct NoCredentials;

#[async_trait]
impl SourceConnector for NoCredentials {
    async fn connect(&self) -> Result<Box<dyn ContentSource>, ConnectError> {
        Err(ConfigError::MissingCredentials {
            missing: vec!["REDDIT_CLIENT_ID"],
        }
        .into())
    }
}

fn state(connector: Arc<dyn SourceConnector>) -> AppState {
    AppState {
        connector,
        collector_config: CollectorConfig::default(),
        validator: Arc::new(ProblemValidator::new().unwrap()),
    }
}

async fn post_json(state: AppState, body: Value) -> (StatusCode, Value) {
    post_raw(state, &body.to_string(), "application/json").await
}

async fn post_raw(state: AppState, body: &str, content_type: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/validate")
                .header("content-type", content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let response = build_router(state(Arc::new(CannedConnector)))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn validate_by_keyword_returns_full_result() {
    let (status, json) = post_json(
        state(Arc::new(CannedConnector)),
        serde_json::json!({
            "problem_statement": "Small businesses struggle with invoicing",
            "keywords": ["invoicing"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    let results = &json["results"];
    assert_eq!(
        results["problem_statement"],
        "Small businesses struggle with invoicing"
    );
    assert_eq!(results["data_volume"], POSTS.len());
    let positive = results["sentiment_analysis"]["positive"].as_u64().unwrap();
    let negative = results["sentiment_analysis"]["negative"].as_u64().unwrap();
    assert_eq!(positive + negative, POSTS.len() as u64);
    assert!(negative > positive);

    let score = results["validation_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert!(results["topic_analysis"]["document_topic_matrix"].is_array());
}

#[tokio::test]
async fn explicit_subreddits_bypass_keywords() {
    let (status, json) = post_json(
        state(Arc::new(CannedConnector)),
        serde_json::json!({
            "problem_statement": "Payroll is painful",
            "keywords": ["nothing-matches"],
            "subreddits": ["smallbusiness"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"]["data_volume"], POSTS.len());
}

#[tokio::test]
async fn nothing_found_is_success_with_zero_score() {
    let (status, json) = post_json(
        state(Arc::new(CannedConnector)),
        serde_json::json!({
            "problem_statement": "Nobody talks about this",
            "keywords": ["obscure"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["results"]["data_volume"], 0);
    assert_eq!(json["results"]["validation_score"], 0.0);
    assert_eq!(json["results"]["topic_analysis"]["topics"], serde_json::json!({}));
}

#[tokio::test]
async fn connection_failure_is_500() {
    let (status, json) = post_json(
        state(Arc::new(NoCredentials)),
        serde_json::json!({
            "problem_statement": "Anything",
            "keywords": ["invoicing"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("REDDIT_CLIENT_ID"));
}

#[tokio::test]
async fn missing_statement_still_validates() {
    let (status, json) = post_json(
        state(Arc::new(CannedConnector)),
        serde_json::json!({ "keywords": ["invoicing"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["results"]["problem_statement"], "");
    assert_eq!(json["results"]["data_volume"], POSTS.len());
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let (status, json) = post_raw(
        state(Arc::new(CannedConnector)),
        "{\"keywords\": [",
        "application/json",
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(json["status"], "error");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn wrong_field_type_is_a_json_error() {
    let (status, json) = post_json(
        state(Arc::new(CannedConnector)),
        serde_json::json!({ "problem_statement": 42 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn missing_content_type_is_a_json_error() {
    let (status, json) = post_raw(
        state(Arc::new(CannedConnector)),
        r#"{"problem_statement": "x"}"#,
        "text/plain",
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["status"], "error");
}
