// Subreddit discovery by keyword.

use anyhow::{Context, Result};
use tracing::debug;

use super::client::RedditClient;
use super::listing::{Listing, SubredditData, Thing};

/// Search subreddits by name and description, returning at most `limit`
/// display names in Reddit's relevance order.
pub async fn search_subreddits(
    client: &RedditClient,
    query: &str,
    limit: usize,
) -> Result<Vec<String>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let limit_str = limit.min(100).to_string();
    let listing: Listing<Thing<SubredditData>> = client
        .get_json("/subreddits/search", &[("q", query), ("limit", limit_str.as_str())])
        .await
        .with_context(|| format!("Failed to search subreddits for {query:?}"))?;

    let names: Vec<String> = listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t5")
        .map(|thing| thing.data.display_name)
        .take(limit)
        .collect();

    debug!(query, found = names.len(), "Subreddit search");
    Ok(names)
}
