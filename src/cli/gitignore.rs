//! .gitignore management.
//!
//! Keeps the state directory out of commits with a managed block.

use std::path::Path;

use crate::error::Error;

/// Managed block markers.
const BLOCK_START: &str = "# START git-ticket state";
const BLOCK_END: &str = "# END git-ticket state";

/// Ignored entries.
const ENTRIES: &str = "/.git-ticket/";

fn managed_block() -> String {
    format!("{}\n{}\n{}\n", BLOCK_START, ENTRIES, BLOCK_END)
}

/// Update or append the managed block.
///
/// - no file: create it with the block
/// - file with the block: replace what is between the markers
/// - file without the block: append the block
pub fn update_gitignore(path: &Path) -> Result<(), Error> {
    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let new_content = if content.is_empty() {
        managed_block()
    } else if let Some(replaced) = replace_managed_block(&content) {
        replaced
    } else {
        format!("{}\n\n{}", content.trim_end(), managed_block())
    };

    std::fs::write(path, new_content)?;
    Ok(())
}

/// `None` when the markers are missing or out of order.
fn replace_managed_block(content: &str) -> Option<String> {
    let start_idx = content.find(BLOCK_START)?;
    let end_idx = content.find(BLOCK_END)?;
    if end_idx < start_idx {
        return None;
    }

    let before = &content[..start_idx];
    let after = content[end_idx + BLOCK_END.len()..].trim_start_matches('\n');

    Some(format!("{}{}{}", before, managed_block(), after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_new_gitignore() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");

        update_gitignore(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(BLOCK_START));
        assert!(content.contains("/.git-ticket/"));
        assert!(content.contains(BLOCK_END));
    }

    #[test]
    fn test_append_to_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        std::fs::write(&path, "target/\n.env").unwrap();

        update_gitignore(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("target/\n.env\n\n"));
        assert!(content.contains("/.git-ticket/"));
    }

    #[test]
    fn test_replace_existing_block() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        let existing = format!("target/\n\n{}\nold-entry\n{}\n.env\n", BLOCK_START, BLOCK_END);
        std::fs::write(&path, &existing).unwrap();

        update_gitignore(&path).unwrap();
        update_gitignore(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old-entry"));
        assert!(content.contains("target/"));
        assert!(content.contains(".env"));
        assert_eq!(content.matches(BLOCK_START).count(), 1);
    }
}
