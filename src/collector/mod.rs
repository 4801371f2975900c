// Collector: turns keywords or subreddit names into a flat Record batch.
//
// Strictly sequential: one group at a time, one item at a time. A failure in
// one keyword search or one group is recorded and skipped; whatever was
// gathered so far is always returned.

pub mod record;
pub mod source;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{describe, RetrievalError};
use record::Record;
use source::{ContentSource, ReplyLimit};

/// Caps and thresholds for a collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// Ranked items to request per group
    pub item_limit: usize,
    /// Replies to keep per accepted item
    pub reply_limit: ReplyLimit,
    /// Items with a lower weight are dropped (their replies are never fetched)
    pub min_weight: i64,
    /// Search results to keep per keyword during group resolution
    pub groups_per_keyword: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            item_limit: 100,
            reply_limit: ReplyLimit::default(),
            min_weight: 10,
            groups_per_keyword: 5,
        }
    }
}

/// Groups discovered from a keyword list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupResolution {
    /// Deduplicated, in first-seen order
    pub groups: Vec<String>,
    pub failures: Vec<RetrievalError>,
}

/// Output of a collection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub records: Vec<Record>,
    pub failures: Vec<RetrievalError>,
}

impl Collection {
    pub fn item_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_item()).count()
    }

    pub fn reply_count(&self) -> usize {
        self.records.len() - self.item_count()
    }
}

pub struct Collector<'a> {
    source: &'a dyn ContentSource,
    config: CollectorConfig,
}

impl<'a> Collector<'a> {
    pub fn new(source: &'a dyn ContentSource, config: CollectorConfig) -> Self {
        Self { source, config }
    }

    /// Resolve keywords into group names via the source's search.
    ///
    /// A keyword with no results contributes nothing; a keyword whose search
    /// fails is recorded in `failures`. Neither stops the remaining keywords.
    pub async fn resolve_groups(&self, keywords: &[String]) -> GroupResolution {
        let mut resolution = GroupResolution::default();
        let mut seen = HashSet::new();

        for keyword in keywords {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                continue;
            }

            match self
                .source
                .search_groups(keyword, self.config.groups_per_keyword)
                .await
            {
                Ok(found) => {
                    debug!(keyword, found = found.len(), "Resolved keyword");
                    for group in found.into_iter().take(self.config.groups_per_keyword) {
                        if seen.insert(group.to_lowercase()) {
                            resolution.groups.push(group);
                        }
                    }
                }
                Err(e) => {
                    warn!(keyword, error = %e, "Subreddit search failed, skipping keyword");
                    resolution.failures.push(RetrievalError::Search {
                        keyword: keyword.to_string(),
                        cause: describe(&e),
                    });
                }
            }
        }

        info!(
            keywords = keywords.len(),
            groups = resolution.groups.len(),
            "Resolved keywords to subreddits"
        );

        resolution
    }

    /// Collect items and replies from each group in order.
    pub async fn collect(&self, groups: &[String]) -> Collection {
        let mut collection = Collection::default();
        let mut seen: HashSet<String> = HashSet::new();

        for group in groups {
            let before = collection.records.len();
            if let Err(e) = self.collect_group(group, &mut seen, &mut collection.records).await {
                warn!(group = group.as_str(), error = %e, "Retrieval failed, moving to next subreddit");
                collection.failures.push(RetrievalError::Group {
                    group: group.clone(),
                    cause: describe(&e),
                });
            }
            debug!(
                group = group.as_str(),
                records = collection.records.len() - before,
                "Finished subreddit"
            );
        }

        info!(
            groups = groups.len(),
            items = collection.item_count(),
            replies = collection.reply_count(),
            failures = collection.failures.len(),
            "Collection complete"
        );

        collection
    }

    /// Resolve `keywords` (unless explicit groups are given) and collect.
    ///
    /// Search failures are folded into the returned collection's failures.
    pub async fn run(&self, groups: Option<&[String]>, keywords: &[String]) -> Collection {
        match groups {
            Some(groups) if !groups.is_empty() => self.collect(groups).await,
            _ => {
                let resolution = self.resolve_groups(keywords).await;
                let mut collection = self.collect(&resolution.groups).await;
                let mut failures = resolution.failures;
                failures.append(&mut collection.failures);
                collection.failures = failures;
                collection
            }
        }
    }

    async fn collect_group(
        &self,
        group: &str,
        seen: &mut HashSet<String>,
        records: &mut Vec<Record>,
    ) -> anyhow::Result<()> {
        let items = self.source.list_items(group, self.config.item_limit).await?;
        let listed = items.len();
        let mut accepted = 0usize;

        for item in items {
            // Cross-posted items can appear in more than one listing
            if seen.contains(&item.id) {
                continue;
            }
            if item.weight < self.config.min_weight {
                continue;
            }

            let item_id = item.id.clone();
            seen.insert(item_id.clone());
            records.push(Record::from_item(group, item));
            accepted += 1;

            if self.config.reply_limit == ReplyLimit::Limited(0) {
                continue;
            }

            let replies = self
                .source
                .list_replies(&item_id, self.config.reply_limit)
                .await?;
            // Replies arrive parents-first, so a skipped reply's subtree
            // is known by the time its children come up
            let mut skipped: HashSet<String> = HashSet::new();
            let mut taken = 0usize;
            for reply in replies {
                if self.config.reply_limit.reached(taken) {
                    break;
                }
                if skipped.contains(&reply.parent_id) || !seen.insert(reply.id.clone()) {
                    skipped.insert(reply.id);
                    continue;
                }
                records.push(Record::from_reply(group, reply));
                taken += 1;
            }
        }

        debug!(group, listed, accepted, "Filtered subreddit listing");
        Ok(())
    }
}
