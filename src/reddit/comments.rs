// Comment tree retrieval and breadth-first flattening.
//
// `/comments/{id}` returns a two-element array: the post listing and the
// comment listing. "Load more" placeholders are dropped rather than
// expanded, so only the comments Reddit materialized in the first response
// are considered. Flattening walks the tree level by level, which means any
// prefix of the result contains every emitted comment's parent.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use serde::de::IgnoredAny;
use tracing::debug;

use super::client::RedditClient;
use super::listing::{absolute_permalink, bare_id, timestamp, CommentData, CommentNode, Listing};
use crate::collector::source::{ReplyLimit, SourceReply};

/// Reddit caps the comment `limit` parameter at 500.
const COMMENT_LIMIT_MAX: usize = 500;

/// Fetch the materialized comments of a post, flattened breadth-first.
pub async fn fetch_comments(
    client: &RedditClient,
    post_id: &str,
    limit: ReplyLimit,
) -> Result<Vec<SourceReply>> {
    let path = format!("/comments/{post_id}");
    let limit_str;
    let mut params: Vec<(&str, &str)> = Vec::new();
    if let ReplyLimit::Limited(max) = limit {
        limit_str = max.min(COMMENT_LIMIT_MAX).to_string();
        params.push(("limit", limit_str.as_str()));
    }

    let (_post, comments): (IgnoredAny, Listing<CommentNode>) = client
        .get_json(&path, &params)
        .await
        .with_context(|| format!("Failed to fetch comments for post {post_id}"))?;

    let flat = flatten_breadth_first(comments.data.children, limit);
    debug!(post_id, count = flat.len(), "Flattened comment tree");

    Ok(flat.into_iter().map(comment_to_reply).collect())
}

/// Flatten a comment forest level by level, dropping placeholders and
/// stopping once `limit` comments have been taken.
pub fn flatten_breadth_first(roots: Vec<CommentNode>, limit: ReplyLimit) -> Vec<CommentData> {
    let mut queue: VecDeque<CommentNode> = roots.into();
    let mut flat = Vec::new();

    while let Some(node) = queue.pop_front() {
        if limit.reached(flat.len()) {
            break;
        }
        let CommentNode::Comment(mut comment) = node else {
            continue;
        };
        if let Some(replies) = comment.replies.take() {
            queue.extend(replies.into_children());
        }
        flat.push(comment);
    }

    flat
}

fn comment_to_reply(comment: CommentData) -> SourceReply {
    SourceReply {
        parent_id: bare_id(&comment.parent_id).to_string(),
        url: absolute_permalink(&comment.permalink),
        created_at: timestamp(comment.created_utc),
        id: comment.id,
        body: comment.body,
        weight: comment.score,
    }
}
