// Reddit API client: OAuth, subreddit search, hot listings, comment trees.
//
// Each submodule handles one area of the API surface. RedditClient is the
// production ContentSource; RedditConnector builds one per request.

pub mod client;
pub mod comments;
pub mod listing;
pub mod posts;
pub mod rate_limiter;
pub mod subreddits;

use anyhow::Result;
use async_trait::async_trait;

use crate::collector::source::{
    ContentSource, ReplyLimit, SourceConnector, SourceItem, SourceReply,
};
use crate::config::Config;
use crate::error::ConnectError;
use client::{Endpoints, RedditClient};

#[async_trait]
impl ContentSource for RedditClient {
    async fn search_groups(&self, keyword: &str, limit: usize) -> Result<Vec<String>> {
        subreddits::search_subreddits(self, keyword, limit).await
    }

    async fn list_items(&self, group: &str, limit: usize) -> Result<Vec<SourceItem>> {
        posts::fetch_hot_posts(self, group, limit).await
    }

    async fn list_replies(&self, item_id: &str, limit: ReplyLimit) -> Result<Vec<SourceReply>> {
        comments::fetch_comments(self, item_id, limit).await
    }
}

/// Connects a fresh RedditClient from configuration.
///
/// Credentials are checked on every connect so a missing variable shows up
/// as a typed ConfigError rather than a failed HTTP call.
pub struct RedditConnector {
    config: Config,
}

impl RedditConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SourceConnector for RedditConnector {
    async fn connect(&self) -> Result<Box<dyn ContentSource>, ConnectError> {
        let credentials = self.config.require_reddit()?;
        let endpoints = Endpoints::from_config(&self.config);
        let client = RedditClient::connect(&credentials, &endpoints).await?;
        Ok(Box::new(client))
    }
}
