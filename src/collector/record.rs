// Record: the flat, uniformly-shaped unit the collector emits.
//
// Items and replies share one shape so the whole batch can be written as a
// single table and handed to the analyzer as one text column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::source::{SourceItem, SourceReply};

/// Whether a record is a top-level item or a reply to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Item,
    Reply,
}

impl RecordKind {
    /// The value written to the `type` column of the CSV export.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Item => "post",
            RecordKind::Reply => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub item_id: String,
    /// None for items; the id of the item or reply responded to otherwise.
    pub parent_id: Option<String>,
    pub kind: RecordKind,
    /// Subreddit the record was collected from
    pub group: String,
    /// Items carry a title, replies don't
    pub title: Option<String>,
    pub body: String,
    /// Score (upvotes) at collection time
    pub weight: i64,
    pub origin_url: String,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn from_item(group: &str, item: SourceItem) -> Self {
        Self {
            item_id: item.id,
            parent_id: None,
            kind: RecordKind::Item,
            group: group.to_string(),
            title: Some(item.title),
            body: item.body,
            weight: item.weight,
            origin_url: item.url,
            created_at: item.created_at,
        }
    }

    pub fn from_reply(group: &str, reply: SourceReply) -> Self {
        Self {
            item_id: reply.id,
            parent_id: Some(reply.parent_id),
            kind: RecordKind::Reply,
            group: group.to_string(),
            title: None,
            body: reply.body,
            weight: reply.weight,
            origin_url: reply.url,
            created_at: reply.created_at,
        }
    }

    pub fn is_item(&self) -> bool {
        self.kind == RecordKind::Item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reply_record_keeps_parent_and_drops_title() {
        let reply = SourceReply {
            id: "c1".to_string(),
            parent_id: "p1".to_string(),
            body: "same here".to_string(),
            weight: 4,
            url: "https://www.reddit.com/r/x/comments/p1/_/c1/".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let record = Record::from_reply("x", reply);
        assert_eq!(record.parent_id.as_deref(), Some("p1"));
        assert_eq!(record.title, None);
        assert_eq!(record.kind, RecordKind::Reply);
        assert!(!record.is_item());
    }

    #[test]
    fn kind_column_values() {
        assert_eq!(RecordKind::Item.as_str(), "post");
        assert_eq!(RecordKind::Reply.as_str(), "comment");
    }
}
