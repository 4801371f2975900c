// CSV export of a collected record batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::collector::record::Record;

pub const CSV_HEADER: [&str; 9] = [
    "item_id",
    "parent_id",
    "type",
    "subreddit",
    "title",
    "content",
    "upvotes",
    "url",
    "created_utc",
];

/// Write `records` to `reddit_data_<YYYYMMDD_HHMMSS>.csv` under `dir`,
/// creating the directory if needed. Writes nothing for an empty batch.
pub fn write_records(records: &[Record], dir: &Path) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(format!(
        "reddit_data_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    ));
    write_records_to(records, &path)?;

    info!(rows = records.len(), path = %path.display(), "Wrote CSV export");
    Ok(Some(path))
}

/// Write `records` to exactly `path`, header row first.
pub fn write_records_to(records: &[Record], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let weight = record.weight.to_string();
        let created = record.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([
            record.item_id.as_str(),
            record.parent_id.as_deref().unwrap_or(""),
            record.kind.as_str(),
            record.group.as_str(),
            record.title.as_deref().unwrap_or(""),
            record.body.as_str(),
            weight.as_str(),
            record.origin_url.as_str(),
            created.as_str(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::record::RecordKind;
    use chrono::TimeZone;

    fn record(id: &str, parent: Option<&str>, body: &str) -> Record {
        Record {
            item_id: id.into(),
            parent_id: parent.map(String::from),
            kind: if parent.is_some() { RecordKind::Reply } else { RecordKind::Item },
            group: "smallbusiness".into(),
            title: parent.is_none().then(|| "Invoicing pain".to_string()),
            body: body.into(),
            weight: 12,
            origin_url: format!("https://www.reddit.com/r/smallbusiness/comments/{id}"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_records(&[], dir.path()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rows_follow_header() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            record("p1", None, "Our invoices, they're a mess"),
            record("c1", Some("p1"), "Same here"),
        ];
        let path = write_records(&records, dir.path()).unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("reddit_data_") && name.ends_with(".csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "post");
        assert_eq!(&rows[0][1], "");
        assert_eq!(&rows[0][5], "Our invoices, they're a mess");
        assert_eq!(&rows[1][1], "p1");
        assert_eq!(&rows[1][2], "comment");
        assert_eq!(&rows[1][4], "");
        assert_eq!(&rows[1][6], "12");
        assert_eq!(&rows[1][8], "2024-03-01 12:30:00");
    }
}
