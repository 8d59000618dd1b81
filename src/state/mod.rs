//! JSON sidecar files kept in the project's `.git-ticket/` directory.

pub mod blast_queue;
pub mod history;

pub use blast_queue::{parse_blast_spec, BlastQueue, BlastRequest, QueueEntry};
pub use history::{merge, HistoryStore};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;

/// Read a JSON file, folding "absent" and "corrupt" into the default value.
pub fn read_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "State file not readable, using default");
            return T::default();
        }
    };

    serde_json::from_str(&data).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Failed to parse state file, starting fresh");
        T::default()
    })
}

/// Overwrite a JSON file with pretty-printed content.
pub fn write_json<T>(path: &Path, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data)?;
    debug!(path = %path.display(), "Saved state file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_and_corrupt_fold_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let absent: Vec<u32> = read_json_or_default(&path);
        assert!(absent.is_empty());

        fs::write(&path, "{not json").unwrap();
        let corrupt: Vec<u32> = read_json_or_default(&path);
        assert!(corrupt.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        write_json(&path, &vec![3u32, 1, 2]).unwrap();
        let loaded: Vec<u32> = read_json_or_default(&path);
        assert_eq!(loaded, vec![3, 1, 2]);
    }
}
