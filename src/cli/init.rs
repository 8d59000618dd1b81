//! Initialize git-ticket for a project.

use std::fs;

use tracing::{info, warn};

use crate::cli::{gitignore, hooks};
use crate::config::Paths;
use crate::error::Error;
use crate::state::{BlastQueue, HistoryStore};

/// Run the init command.
///
/// Fails without touching anything if the state directory already exists.
pub fn run(paths: &Paths) -> Result<(), Error> {
    if paths.state_dir.exists() {
        return Err(Error::AlreadyInitialized(paths.state_dir.clone()));
    }

    fs::create_dir_all(&paths.state_dir)?;
    info!(path = %paths.state_dir.display(), "Created state directory");

    HistoryStore::new(paths.history.clone()).write(&[])?;
    BlastQueue::new(paths.blast_queue.clone()).write(&[])?;

    if hooks::has_git(&paths.project_root) {
        gitignore::update_gitignore(&paths.project_root.join(".gitignore"))?;

        // Blasts can still be sent with --send-blast without the hook
        match hooks::install_hooks(&paths.project_root) {
            Ok(true) => println!("Post-commit hook installed."),
            Ok(false) => println!(
                "No post-commit hook installed (.git is not a directory); run `git-ticket --send-blast` after committing."
            ),
            Err(e) => {
                warn!(error = %e, "Failed to install git hooks");
                println!("Warning: could not install post-commit hook: {}", e);
            }
        }
    }

    println!("git-ticket initialized in {}", paths.state_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_empty_state() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::new(dir.path(), dir.path());

        run(&paths).unwrap();

        assert!(paths.is_initialized());
        assert_eq!(fs::read_to_string(&paths.history).unwrap(), "[]");
        assert_eq!(fs::read_to_string(&paths.blast_queue).unwrap(), "[]");
        assert!(!dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_init_in_git_repo_installs_hook_and_ignore() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let paths = Paths::new(dir.path(), dir.path());

        run(&paths).unwrap();

        assert!(dir.path().join(".git/hooks/post-commit").exists());
        let ignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(ignore.contains("/.git-ticket/"));
    }

    #[test]
    fn test_init_in_worktree_updates_ignore_without_hook() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: ../main/.git/worktrees/a\n").unwrap();
        let paths = Paths::new(dir.path(), dir.path());

        run(&paths).unwrap();

        assert!(paths.is_initialized());
        assert!(dir.path().join(".git").is_file());
        let ignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(ignore.contains("/.git-ticket/"));
    }

    #[test]
    fn test_init_twice_fails_without_changes() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::new(dir.path(), dir.path());
        run(&paths).unwrap();
        fs::write(&paths.history, "[42]").unwrap();

        let err = run(&paths).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized(_)));
        assert_eq!(fs::read_to_string(&paths.history).unwrap(), "[42]");
    }
}
