// Reddit OAuth client: app-only auth plus a generic JSON GET helper.
//
// The collector only reads public listings, so the client uses the
// client-credentials grant: no user login, one bearer token per client.
// Construction performs a cheap read to prove the credentials work; any
// failure there is fatal and surfaces as a ConnectError.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::listing::{SearchNamesResponse, TokenResponse};
use super::rate_limiter::RateLimiter;
use crate::config::{Config, RedditCredentials};
use crate::error::{describe, ConnectError};

/// Where the client sends its requests and how fast.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api_url: String,
    pub auth_url: String,
    pub requests_per_second: f64,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            auth_url: config.auth_url.clone(),
            requests_per_second: config.requests_per_second,
        }
    }
}

/// Authenticated, rate-limited HTTP client for the Reddit OAuth API.
pub struct RedditClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    rate_limiter: RateLimiter,
}

impl RedditClient {
    /// Authenticate and verify the connection with a simple read.
    pub async fn connect(
        credentials: &RedditCredentials,
        endpoints: &Endpoints,
    ) -> Result<Self, ConnectError> {
        let client = reqwest::Client::builder()
            .user_agent(credentials.user_agent.as_str())
            .build()
            .map_err(|e| ConnectError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        info!("Connecting to Reddit API...");

        let token = fetch_token(&client, &endpoints.auth_url, credentials)
            .await
            .map_err(|e| ConnectError::Auth(describe(&e)))?;

        let reddit = Self {
            client,
            api_url: endpoints.api_url.trim_end_matches('/').to_string(),
            token,
            rate_limiter: RateLimiter::new(endpoints.requests_per_second),
        };

        reddit
            .get_json::<SearchNamesResponse>(
                "/api/search_reddit_names",
                &[("query", "test"), ("exact", "true")],
            )
            .await
            .map_err(|e| ConnectError::Unreachable(describe(&e)))?;

        info!("Connected to Reddit API");
        Ok(reddit)
    }

    /// GET an API path and deserialize the JSON response.
    ///
    /// `raw_json=1` is always added so bodies come back without HTML
    /// entity escaping.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.rate_limiter.acquire().await;

        let url = format!("{}{}", self.api_url, path);
        debug!(path, "Reddit GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .query(&[("raw_json", "1")])
            .send()
            .await
            .with_context(|| format!("Reddit request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Reddit {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }
}

/// Exchange client credentials for an app-only bearer token.
async fn fetch_token(
    client: &reqwest::Client,
    auth_url: &str,
    credentials: &RedditCredentials,
) -> Result<String> {
    let url = format!("{}/api/v1/access_token", auth_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .context("Token request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Token endpoint returned {status}: {body}");
    }

    let token: TokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;

    match (token.access_token, token.error) {
        (Some(access_token), _) if !access_token.is_empty() => Ok(access_token),
        (_, Some(error)) => anyhow::bail!("Token endpoint rejected credentials: {error}"),
        _ => anyhow::bail!("Token endpoint returned no access token"),
    }
}
