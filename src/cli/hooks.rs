//! Git hook installation.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::info;

use crate::error::Error;

/// Marker identifying our section of a hook script.
const HOOK_MARKER: &str = "git-ticket blast delivery";

/// Post-commit hook script content.
const POST_COMMIT_HOOK: &str = r#"#!/bin/sh
# git-ticket blast delivery (auto-installed)
# Sends the pending chat blast, if any, after each commit

git-ticket --send-blast || true
"#;

/// Check if git is initialized in the project.
pub fn has_git(project_root: &Path) -> bool {
    project_root.join(".git").exists()
}

/// Install the post-commit hook that delivers pending blasts.
///
/// Returns `false` when `.git` is not a directory (no repository, or a
/// worktree/submodule link file) and nothing was installed.
pub fn install_hooks(project_root: &Path) -> Result<bool, Error> {
    let git_dir = project_root.join(".git");
    if !git_dir.is_dir() {
        return Ok(false);
    }

    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir)?;

    let post_commit_path = hooks_dir.join("post-commit");
    install_hook(&post_commit_path, POST_COMMIT_HOOK)?;
    info!(path = %post_commit_path.display(), "Installed post-commit hook");

    Ok(true)
}

/// Install a single hook, preserving existing hooks.
fn install_hook(path: &Path, content: &str) -> Result<(), Error> {
    let final_content = if path.exists() {
        let existing = fs::read_to_string(path)?;

        if existing.contains(HOOK_MARKER) {
            return Ok(());
        }

        let body = content.trim_start_matches("#!/bin/sh\n");
        insert_hook_body(&existing, body)
    } else {
        content.to_string()
    };

    fs::write(path, &final_content)?;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;

    Ok(())
}

/// Append `body` to an existing hook, minus our shebang. A trailing `exit`
/// would skip anything after it, so the body goes in front of it instead.
fn insert_hook_body(existing: &str, body: &str) -> String {
    let existing = existing.trim_end();
    let (head, last) = match existing.rsplit_once('\n') {
        Some((head, last)) => (head, last),
        None => ("", existing),
    };

    if last.trim_start().starts_with("exit") {
        format!("{}\n\n{}\n{}\n", head.trim_end(), body, last)
    } else {
        format!("{}\n\n{}", existing, body)
    }
}
