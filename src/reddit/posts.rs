// Hot-post listing with pagination.
//
// Reddit returns at most 100 posts per page; the `after` cursor walks the
// listing until the requested count is reached or the listing runs dry.

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::client::RedditClient;
use super::listing::{absolute_permalink, timestamp, Listing, PostData, Thing};
use crate::collector::source::SourceItem;

const PAGE_SIZE_MAX: usize = 100;

/// Fetch up to `limit` posts from a subreddit's hot listing.
pub async fn fetch_hot_posts(
    client: &RedditClient,
    subreddit: &str,
    limit: usize,
) -> Result<Vec<SourceItem>> {
    let mut posts = Vec::new();
    let mut after: Option<String> = None;
    let path = format!("/r/{subreddit}/hot");

    while posts.len() < limit {
        let page_size = (limit - posts.len()).min(PAGE_SIZE_MAX).to_string();
        let mut params: Vec<(&str, &str)> = vec![("limit", page_size.as_str())];
        if let Some(ref cursor) = after {
            params.push(("after", cursor.as_str()));
        }

        let page: Listing<Thing<PostData>> = client
            .get_json(&path, &params)
            .await
            .with_context(|| format!("Failed to fetch hot posts for r/{subreddit}"))?;

        let page_len = page.data.children.len();
        for thing in page.data.children {
            if thing.kind != "t3" {
                continue;
            }
            posts.push(post_to_item(thing.data));
            if posts.len() >= limit {
                break;
            }
        }

        debug!(
            page_posts = page_len,
            total_collected = posts.len(),
            "Fetched page of posts for r/{}",
            subreddit
        );

        after = page.data.after;
        if after.is_none() || page_len == 0 {
            break;
        }
    }

    info!(count = posts.len(), subreddit, "Listed hot posts");
    Ok(posts)
}

/// Map a `t3` listing entry onto the collector's item shape.
pub fn post_to_item(post: PostData) -> SourceItem {
    // Self posts link to themselves; keep the external link for link posts
    let url = if post.url.is_empty() {
        absolute_permalink(&post.permalink)
    } else {
        post.url
    };

    SourceItem {
        id: post.id,
        title: post.title,
        body: post.selftext,
        weight: post.score,
        url,
        created_at: timestamp(post.created_utc),
    }
}
