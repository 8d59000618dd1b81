//! Recently referenced ticket ids, most recent first.

use std::path::PathBuf;

use tracing::debug;

use crate::error::Error;
use crate::state::{read_json_or_default, write_json};
use crate::ticket::TicketId;

/// Fold newly referenced ids into the history.
///
/// An id is only compared against the current head, so ids deeper in the
/// list can appear again. `0` is never added to a non-empty history.
pub fn merge(mut current: Vec<TicketId>, new_ids: &[TicketId]) -> Vec<TicketId> {
    if current.is_empty() {
        return new_ids.to_vec();
    }

    for &id in new_ids.iter().rev() {
        if current.first() != Some(&id) && !id.is_none() {
            current.insert(0, id);
        }
    }

    current
}

/// History file store.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stored history; empty if the file is missing or unreadable.
    pub fn read(&self) -> Vec<TicketId> {
        read_json_or_default(&self.path)
    }

    /// The `count` most recent ids.
    pub fn recent(&self, count: usize) -> Vec<TicketId> {
        self.read().into_iter().take(count).collect()
    }

    pub fn write(&self, history: &[TicketId]) -> Result<(), Error> {
        write_json(&self.path, history)
    }

    /// Merge `new_ids` into the stored history and persist the result.
    pub fn record(&self, new_ids: &[TicketId]) -> Result<Vec<TicketId>, Error> {
        let merged = merge(self.read(), new_ids);
        self.write(&merged)?;
        debug!(entries = merged.len(), "Updated ticket history");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(raw: &[u32]) -> Vec<TicketId> {
        raw.iter().copied().map(TicketId::new).collect()
    }

    #[test]
    fn test_merge_into_empty_is_verbatim() {
        assert_eq!(merge(vec![], &ids(&[4, 0, 9])), ids(&[4, 0, 9]));
        assert_eq!(merge(vec![], &ids(&[7])), ids(&[7]));
    }

    #[test]
    fn test_merge_prepends_in_order() {
        let merged = merge(ids(&[10, 11]), &ids(&[1, 2, 3]));
        assert_eq!(merged, ids(&[1, 2, 3, 10, 11]));
    }

    #[test]
    fn test_merge_skips_head_and_zero() {
        assert_eq!(merge(ids(&[10, 11]), &ids(&[10])), ids(&[10, 11]));
        assert_eq!(merge(ids(&[10, 11]), &ids(&[0, 5])), ids(&[5, 10, 11]));
    }

    #[test]
    fn test_merge_only_checks_head() {
        // 11 is already present deeper in the list and gets inserted again.
        assert_eq!(merge(ids(&[10, 11]), &ids(&[11])), ids(&[11, 10, 11]));
    }

    #[test]
    fn test_merge_nothing_new() {
        assert_eq!(merge(ids(&[3, 2]), &[]), ids(&[3, 2]));
    }

    #[test]
    fn test_store_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.read().is_empty());
        assert!(store.recent(3).is_empty());
    }

    #[test]
    fn test_store_record_and_recent() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store.record(&ids(&[5, 6])).unwrap();
        store.record(&ids(&[7])).unwrap();

        assert_eq!(store.read(), ids(&[7, 5, 6]));
        assert_eq!(store.recent(2), ids(&[7, 5]));
        assert_eq!(store.recent(10), ids(&[7, 5, 6]));
    }

    #[test]
    fn test_store_reads_legacy_string_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"["123", "45"]"#).unwrap();

        let store = HistoryStore::new(path);
        assert_eq!(store.read(), ids(&[123, 45]));
    }
}
