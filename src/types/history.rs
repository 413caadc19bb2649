use serde::{Deserialize, Serialize};

/// A single visited URL as it appears in the browsing history.
///
/// Serialized with the field names the persisted list has always used
/// (`visitCount`, epoch-millisecond `timestamp`). Older lists stored the
/// counter as `visits`, which is still accepted on read. A missing title
/// reads as empty and is rebuilt from the URL by the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub timestamp: i64,
    #[serde(alias = "visits")]
    pub visit_count: u32,
}
