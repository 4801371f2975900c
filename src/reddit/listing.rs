// Serde types for Reddit's listing JSON.
//
// Every collection endpoint returns `{"kind": "Listing", "data": {"after",
// "children": [...]}}`. Children are `{"kind": "t3" | "t1" | "t5" | "more",
// "data": {...}}`. Comment trees nest a Listing under each comment's
// `replies`, which Reddit sends as an empty string when there are none.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A generic listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    /// Fullname of the last child, used as the `after` cursor
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,
}

/// A typed child wrapper (`t3` posts, `t5` subreddits).
#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// The fields of a `t3` post the collector needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PostData {
    pub id: String,
    pub subreddit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub permalink: String,
    pub created_utc: f64,
}

/// The fields of a `t5` subreddit from search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SubredditData {
    pub display_name: String,
}

/// One node of a comment tree: a real comment or a "load more" placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum CommentNode {
    #[serde(rename = "t1")]
    Comment(CommentData),
    #[serde(rename = "more")]
    More(MoreData),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentData {
    pub id: String,
    /// Fullname of the parent (`t3_…` for top-level comments, `t1_…` otherwise)
    pub parent_id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub permalink: String,
    pub created_utc: f64,
    #[serde(default)]
    pub replies: Option<Replies>,
}

/// "Load more comments" stub. Never expanded, so its fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MoreData {}

/// Reddit sends `""` instead of a listing when a comment has no replies.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Listing(Listing<CommentNode>),
    Empty(String),
}

impl Replies {
    pub fn into_children(self) -> Vec<CommentNode> {
        match self {
            Replies::Listing(listing) => listing.data.children,
            Replies::Empty(_) => Vec::new(),
        }
    }
}

/// Response from `/api/search_reddit_names`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchNamesResponse {
    #[serde(default)]
    pub names: Vec<String>,
}

/// Response from the OAuth token endpoint. Reddit reports some credential
/// problems as a 200 with an `error` field instead of a token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

/// Strip the `t1_` / `t3_` type prefix from a Reddit fullname.
pub fn bare_id(fullname: &str) -> &str {
    match fullname.split_once('_') {
        Some((prefix, id)) if prefix.len() == 2 && prefix.starts_with('t') => id,
        _ => fullname,
    }
}

/// Convert Reddit's fractional epoch seconds to a UTC timestamp.
pub fn timestamp(created_utc: f64) -> DateTime<Utc> {
    let secs = created_utc.trunc() as i64;
    let nanos = ((created_utc.fract()) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}

/// Turn a site-relative permalink into an absolute URL.
pub fn absolute_permalink(permalink: &str) -> String {
    if permalink.starts_with("http://") || permalink.starts_with("https://") {
        permalink.to_string()
    } else {
        format!("https://www.reddit.com{permalink}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_strips_type_prefix() {
        assert_eq!(bare_id("t3_abc123"), "abc123");
        assert_eq!(bare_id("t1_xyz"), "xyz");
        assert_eq!(bare_id("abc123"), "abc123");
    }

    #[test]
    fn bare_id_keeps_ids_with_underscores() {
        assert_eq!(bare_id("some_id"), "some_id");
    }

    #[test]
    fn timestamp_from_epoch_seconds() {
        let ts = timestamp(1_700_000_000.0);
        assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn permalink_made_absolute() {
        assert_eq!(
            absolute_permalink("/r/rust/comments/abc/title/"),
            "https://www.reddit.com/r/rust/comments/abc/title/"
        );
    }
}
