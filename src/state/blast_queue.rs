//! Pending broadcast ("blast") queue.
//!
//! Entries are stored newest first. Only the head is ever live: a blast at
//! the head is pending, a no-op marker (or an empty queue) means drained.
//! Older entries stay in the file as a record of past dispatches.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::state::{read_json_or_default, write_json};

/// A queued broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastRequest {
    pub id: Uuid,
    pub recipients: Vec<String>,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub author: String,
}

impl BlastRequest {
    pub fn new(recipients: Vec<String>, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipients,
            message,
            timestamp: Utc::now().to_rfc3339(),
            author: whoami::username(),
        }
    }
}

/// Marker pushed once the head blast has been delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoopMarker {
    pub timestamp: String,
    /// Blast this marker drained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drained: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueueEntry {
    Blast(BlastRequest),
    Noop(NoopMarker),
}

/// Split `"a, b:message"` into recipients and message.
///
/// Without a colon the whole spec is the recipient list and the message is
/// empty.
pub fn parse_blast_spec(spec: &str) -> Result<(Vec<String>, String), Error> {
    let (recipients, message) = match spec.split_once(':') {
        Some((recipients, message)) => (recipients, message.to_string()),
        None => (spec, String::new()),
    };

    let recipients: Vec<String> = recipients
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    if recipients.is_empty() {
        return Err(Error::InvalidBlast(format!(
            "no recipients in {:?}, expected \"<recipients>[:<message>]\"",
            spec
        )));
    }

    Ok((recipients, message))
}

/// Blast queue file store.
#[derive(Debug, Clone)]
pub struct BlastQueue {
    path: PathBuf,
}

impl BlastQueue {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn read(&self) -> Vec<QueueEntry> {
        read_json_or_default(&self.path)
    }

    pub fn write(&self, entries: &[QueueEntry]) -> Result<(), Error> {
        write_json(&self.path, entries)
    }

    /// Parse `spec` and queue it as the new head.
    pub fn store(&self, spec: &str) -> Result<BlastRequest, Error> {
        let (recipients, message) = parse_blast_spec(spec)?;
        let blast = BlastRequest::new(recipients, message);

        let mut entries = self.read();
        entries.insert(0, QueueEntry::Blast(blast.clone()));
        self.write(&entries)?;

        info!(blast_id = %blast.id, recipients = blast.recipients.len(), "Stored blast");
        Ok(blast)
    }

    /// The head blast, if one is waiting for delivery.
    pub fn pending(&self) -> Option<BlastRequest> {
        match self.read().into_iter().next() {
            Some(QueueEntry::Blast(blast)) => Some(blast),
            _ => None,
        }
    }

    /// Push a no-op marker so the current head is no longer live.
    pub fn mark_drained(&self, drained: Option<Uuid>) -> Result<(), Error> {
        let mut entries = self.read();
        entries.insert(
            0,
            QueueEntry::Noop(NoopMarker {
                timestamp: Utc::now().to_rfc3339(),
                drained,
            }),
        );
        self.write(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn queue(dir: &TempDir) -> BlastQueue {
        BlastQueue::new(dir.path().join("blasts.json"))
    }

    #[test]
    fn test_parse_spec_with_message() {
        let (recipients, message) = parse_blast_spec("dev, ann ,bob:deploying: now").unwrap();
        assert_eq!(recipients, vec!["dev", "ann", "bob"]);
        assert_eq!(message, "deploying: now");
    }

    #[test]
    fn test_parse_spec_without_message() {
        let (recipients, message) = parse_blast_spec("dev,ops").unwrap();
        assert_eq!(recipients, vec!["dev", "ops"]);
        assert_eq!(message, "");
    }

    #[test]
    fn test_parse_spec_without_recipients() {
        assert!(matches!(
            parse_blast_spec(":hello"),
            Err(Error::InvalidBlast(_))
        ));
        assert!(matches!(parse_blast_spec(" , "), Err(Error::InvalidBlast(_))));
    }

    #[test]
    fn test_empty_queue_is_drained() {
        let dir = TempDir::new().unwrap();
        assert!(queue(&dir).pending().is_none());
    }

    #[test]
    fn test_store_then_drain() {
        let dir = TempDir::new().unwrap();
        let queue = queue(&dir);

        let blast = queue.store("dev:hello").unwrap();
        assert_eq!(queue.pending(), Some(blast.clone()));

        queue.mark_drained(Some(blast.id)).unwrap();
        assert!(queue.pending().is_none());

        let entries = queue.read();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], QueueEntry::Noop(m) if m.drained == Some(blast.id)));
        assert!(matches!(&entries[1], QueueEntry::Blast(b) if b.id == blast.id));
    }

    #[test]
    fn test_newest_store_wins() {
        let dir = TempDir::new().unwrap();
        let queue = queue(&dir);

        queue.store("dev:first").unwrap();
        let second = queue.store("ops:second").unwrap();

        let pending = queue.pending().unwrap();
        assert_eq!(pending.id, second.id);
        assert_eq!(pending.message, "second");
        assert_eq!(queue.read().len(), 2);
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let queue = queue(&dir);
        queue.store("dev:hi").unwrap();
        queue.mark_drained(None).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("blasts.json")).unwrap())
                .unwrap();
        assert_eq!(raw[0]["kind"], "noop");
        assert_eq!(raw[1]["kind"], "blast");
        assert_eq!(raw[1]["recipients"][0], "dev");
        assert_eq!(raw[1]["message"], "hi");
    }
}
