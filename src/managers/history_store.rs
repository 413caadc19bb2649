//! History Store for DarkProxy.
//!
//! Implements `HistoryStoreTrait`: recording visits, listing, deleting and
//! clearing browsing history. The ordered list lives in memory and is written
//! back to [`LocalStorage`] as one JSON array after every mutation.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

use crate::database::local_storage::{LocalStorage, HISTORY_KEY};
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Maximum number of entries kept; the oldest is evicted beyond this.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Number of entries shown in the recent-history panel.
pub const RECENT_DISPLAY_COUNT: usize = 5;

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn record_visit(&mut self, url: &str) -> Result<HistoryEntry, HistoryError>;
    fn remove(&mut self, url: &str) -> Result<(), HistoryError>;
    fn clear(&mut self) -> Result<(), HistoryError>;
    fn recent(&self, n: usize) -> Vec<HistoryEntry>;
    fn all(&self) -> Vec<HistoryEntry>;
}

/// Derives the display title for a URL: its hostname without a leading
/// `www.`, or the raw string when it does not parse as an absolute URL.
/// A URL that parses but has no host (`mailto:`, `data:`) gets an empty title.
pub fn derive_title(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Returns the current UNIX time in milliseconds.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Ordered, bounded browsing history persisted to local storage.
pub struct HistoryStore {
    storage: Rc<dyn LocalStorage>,
    entries: Vec<HistoryEntry>,
    clock: fn() -> i64,
}

impl HistoryStore {
    /// Loads the persisted list from `storage`.
    ///
    /// A missing, unreadable or malformed value yields an empty store.
    pub fn load(storage: Rc<dyn LocalStorage>) -> Self {
        Self::load_with_clock(storage, now_millis)
    }

    /// Same as [`HistoryStore::load`] with an injected millisecond clock.
    pub fn load_with_clock(storage: Rc<dyn LocalStorage>, clock: fn() -> i64) -> Self {
        let entries = match storage.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => Self::parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("history unreadable, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("history loaded with {} entries", entries.len());
        Self {
            storage,
            entries,
            clock,
        }
    }

    /// Parses a persisted list, skipping records that do not fit the
    /// entry shape and re-establishing the uniqueness and size bounds.
    fn parse_entries(raw: &str) -> Vec<HistoryEntry> {
        let values = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(values)) => values,
            Ok(_) => {
                log::warn!("history value is not a list, starting empty");
                return Vec::new();
            }
            Err(e) => {
                log::warn!("history value is malformed, starting empty: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(values.len().min(MAX_HISTORY_ENTRIES));
        for value in values {
            let Ok(mut entry) = serde_json::from_value::<HistoryEntry>(value) else {
                log::debug!("skipping malformed history record");
                continue;
            };
            if !seen.insert(entry.url.clone()) {
                continue;
            }
            entry.visit_count = entry.visit_count.max(1);
            if entry.title.is_empty() {
                entry.title = derive_title(&entry.url);
            }
            entries.push(entry);
            if entries.len() == MAX_HISTORY_ENTRIES {
                break;
            }
        }
        entries
    }

    /// Writes `entries` and, only once that succeeded, adopts them.
    fn commit(&mut self, entries: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&entries)
            .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
        self.storage.set_item(HISTORY_KEY, &json)?;
        self.entries = entries;
        Ok(())
    }

    /// Looks up the entry for `url`.
    pub fn get(&self, url: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.url == url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Records a visit. A known URL keeps its position and gets its counter
    /// bumped and timestamp refreshed; a new URL goes to the front.
    fn record_visit(&mut self, url: &str) -> Result<HistoryEntry, HistoryError> {
        let now = (self.clock)();
        let mut entries = self.entries.clone();

        let entry = match entries.iter_mut().find(|e| e.url == url) {
            Some(existing) => {
                existing.visit_count = existing.visit_count.saturating_add(1);
                existing.timestamp = existing.timestamp.max(now);
                existing.clone()
            }
            None => {
                let entry = HistoryEntry {
                    url: url.to_string(),
                    title: derive_title(url),
                    timestamp: now,
                    visit_count: 1,
                };
                entries.insert(0, entry.clone());
                if entries.len() > MAX_HISTORY_ENTRIES {
                    if let Some(evicted) = entries.pop() {
                        log::debug!("history full, evicted {}", evicted.url);
                    }
                }
                entry
            }
        };

        self.commit(entries)?;
        log::debug!("recorded visit #{} to {}", entry.visit_count, entry.url);
        Ok(entry)
    }

    fn remove(&mut self, url: &str) -> Result<(), HistoryError> {
        let entries: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.url != url)
            .cloned()
            .collect();
        self.commit(entries)
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.commit(Vec::new())?;
        log::info!("history cleared");
        Ok(())
    }

    fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(n).cloned().collect()
    }

    fn all(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }
}
