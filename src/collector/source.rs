// Content source traits: the swap-ready seam between the collector and a
// concrete platform client.
//
// The collector only ever talks to a ContentSource. RedditClient is the
// production implementation; tests use an in-memory fake. SourceConnector
// builds a fresh source per request so the web layer never shares a client
// across callers.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ConnectError;

/// How many replies to take per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyLimit {
    /// Take at most this many replies (0 means none).
    Limited(usize),
    /// Take every materialized reply.
    Unbounded,
}

impl ReplyLimit {
    /// Whether `count` replies have reached the limit.
    pub fn reached(&self, count: usize) -> bool {
        match self {
            ReplyLimit::Limited(max) => count >= *max,
            ReplyLimit::Unbounded => false,
        }
    }
}

impl Default for ReplyLimit {
    fn default() -> Self {
        ReplyLimit::Limited(50)
    }
}

/// A ranked top-level item as listed by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub weight: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// A reply as returned by the source, already flattened breadth-first.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReply {
    pub id: String,
    /// Bare id (no type prefix) of the item or reply this responds to.
    pub parent_id: String,
    pub body: String,
    pub weight: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Read-only access to a content platform.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Search for group names matching a keyword, at most `limit` of them.
    async fn search_groups(&self, keyword: &str, limit: usize) -> Result<Vec<String>>;

    /// List up to `limit` ranked items in a group.
    async fn list_items(&self, group: &str, limit: usize) -> Result<Vec<SourceItem>>;

    /// Fetch the replies to an item with placeholders dropped, breadth-first,
    /// truncated to `limit`.
    async fn list_replies(&self, item_id: &str, limit: ReplyLimit) -> Result<Vec<SourceReply>>;
}

/// Builds a connected ContentSource. Connection failures are fatal.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn ContentSource>, ConnectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_reached_at_cap() {
        let limit = ReplyLimit::Limited(3);
        assert!(!limit.reached(2));
        assert!(limit.reached(3));
    }

    #[test]
    fn zero_limit_is_immediately_reached() {
        assert!(ReplyLimit::Limited(0).reached(0));
    }

    #[test]
    fn unbounded_never_reached() {
        assert!(!ReplyLimit::Unbounded.reached(usize::MAX));
    }
}
