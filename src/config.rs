use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default OAuth API endpoint for authenticated Reddit reads.
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";

/// Default endpoint for the OAuth token exchange.
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";

/// Reddit allows 100 OAuth requests per minute; one per second stays well
/// inside that.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 1.0;

/// Credentials and endpoints for the Reddit API.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded by the binary at startup via dotenvy. Loading itself never
/// fails on missing credentials. Call [`Config::require_reddit`] before
/// constructing a client.
#[derive(Debug, Clone)]
pub struct Config {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    /// OAuth API base URL (defaults to https://oauth.reddit.com)
    pub api_url: String,
    /// Token endpoint base URL (defaults to https://www.reddit.com)
    pub auth_url: String,
    /// Where `collect` writes its CSV files
    pub output_dir: PathBuf,
    /// Request pacing for the Reddit client
    pub requests_per_second: f64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only an unparseable `VALIDATOR_REQUESTS_PER_SECOND` is an error here;
    /// everything else has a default or is checked later.
    pub fn load() -> Result<Self, ConfigError> {
        let requests_per_second = match env::var("VALIDATOR_REQUESTS_PER_SECOND") {
            Ok(raw) => parse_rate(&raw)?,
            Err(_) => DEFAULT_REQUESTS_PER_SECOND,
        };

        Ok(Self {
            reddit_client_id: env::var("REDDIT_CLIENT_ID").unwrap_or_default(),
            reddit_client_secret: env::var("REDDIT_CLIENT_SECRET").unwrap_or_default(),
            reddit_user_agent: env::var("REDDIT_USER_AGENT").unwrap_or_default(),
            api_url: env::var("REDDIT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            auth_url: env::var("REDDIT_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            output_dir: env::var("VALIDATOR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
            requests_per_second,
        })
    }

    /// Check that all three Reddit credentials are configured and return them.
    ///
    /// Call this before any operation that talks to Reddit.
    pub fn require_reddit(&self) -> Result<RedditCredentials, ConfigError> {
        let mut missing = Vec::new();
        if self.reddit_client_id.trim().is_empty() {
            missing.push("REDDIT_CLIENT_ID");
        }
        if self.reddit_client_secret.trim().is_empty() {
            missing.push("REDDIT_CLIENT_SECRET");
        }
        if self.reddit_user_agent.trim().is_empty() {
            missing.push("REDDIT_USER_AGENT");
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials { missing });
        }

        Ok(RedditCredentials {
            client_id: self.reddit_client_id.clone(),
            client_secret: self.reddit_client_secret.clone(),
            user_agent: self.reddit_user_agent.clone(),
        })
    }
}

/// Slowest accepted pace: one request every 100 seconds.
pub const MIN_REQUESTS_PER_SECOND: f64 = 0.01;

fn parse_rate(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= MIN_REQUESTS_PER_SECOND => Ok(rate),
        _ => Err(ConfigError::InvalidValue {
            var: "VALIDATOR_REQUESTS_PER_SECOND",
            value: raw.to_string(),
        }),
    }
}
