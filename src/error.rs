// Typed error values for each stage of the pipeline.
//
// Internal plumbing (HTTP, CSV, JSON) still uses anyhow with context. At the
// seams where a caller needs to tell "nothing found" apart from "something
// failed", those errors are flattened into one of these enums.

use serde::Serialize;
use thiserror::Error;

/// Configuration could not be used to build the Reddit client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing Reddit API credentials: {}. Set them in your .env file", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Connecting to the content source failed. Fatal for the request that
/// triggered it; never retried.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Reddit authentication failed: {0}")]
    Auth(String),

    #[error("Reddit connection check failed: {0}")]
    Unreachable(String),
}

/// A recovered retrieval failure. The collector logs these, skips the
/// affected keyword or group, and returns them next to the partial results.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum RetrievalError {
    #[error("subreddit search for {keyword:?} failed: {cause}")]
    Search { keyword: String, cause: String },

    #[error("retrieval from r/{group} failed: {cause}")]
    Group { group: String, cause: String },
}

/// The analysis pipeline could not produce a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("sentiment scoring failed: {0}")]
    Sentiment(String),

    #[error("vectorization failed: {0}")]
    Vectorize(String),

    #[error("factorization failed: {0}")]
    Factorize(String),
}

/// Render an anyhow error with its full context chain on one line.
pub(crate) fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
