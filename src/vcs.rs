//! Version control operations, delegated to the `git` CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::Error;

/// The two git operations the tool needs.
pub trait VersionControl {
    /// Most recent commit log entry as plain text.
    fn last_log_entry(&self) -> Result<String, Error>;

    /// Commit all tracked changes using `message_file`, opening the editor.
    fn commit(&self, message_file: &Path) -> Result<(), Error>;
}

/// `git` run inside a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd
    }
}

impl VersionControl for Git {
    fn last_log_entry(&self) -> Result<String, Error> {
        let output = self
            .command()
            .args(["log", "-1"])
            .output()
            .map_err(|e| Error::vcs("log", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::vcs("log", stderr.trim()));
        }

        let entry = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        debug!(bytes = entry.len(), "Read latest commit");
        Ok(entry)
    }

    fn commit(&self, message_file: &Path) -> Result<(), Error> {
        info!(file = %message_file.display(), "Running git commit");

        // Inherits the terminal so the editor can open.
        let status = self
            .command()
            .arg("commit")
            .arg("-a")
            .arg("--edit")
            .arg("-F")
            .arg(message_file)
            .status()
            .map_err(|e| Error::vcs("commit", e.to_string()))?;

        if !status.success() {
            return Err(Error::vcs("commit", format!("exited with {}", status)));
        }

        Ok(())
    }
}
