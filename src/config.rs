//! Configuration and file locations for git-ticket.
//!
//! Per-project state lives in `<project>/.git-ticket/`, per-user settings
//! (tool config, chat credentials, aliases) in `~/.git-ticket/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::state::read_json_or_default;

/// Name of the state directory, both per project and per user.
pub const STATE_DIR_NAME: &str = ".git-ticket";

/// Every file location the tool touches.
#[derive(Debug, Clone)]
pub struct Paths {
    pub project_root: PathBuf,
    pub state_dir: PathBuf,
    pub history: PathBuf,
    pub blast_queue: PathBuf,
    pub commit_message: PathBuf,
    pub user_dir: PathBuf,
    pub config: PathBuf,
    pub aliases: PathBuf,
    pub chat_config: PathBuf,
}

impl Paths {
    pub fn new(project_root: &Path, home_dir: &Path) -> Self {
        let state_dir = project_root.join(STATE_DIR_NAME);
        let user_dir = home_dir.join(STATE_DIR_NAME);
        Self {
            project_root: project_root.to_path_buf(),
            history: state_dir.join("history.json"),
            blast_queue: state_dir.join("blasts.json"),
            commit_message: state_dir.join("COMMIT_MSG"),
            state_dir,
            config: user_dir.join("config.toml"),
            aliases: user_dir.join("aliases.json"),
            chat_config: user_dir.join("chat.json"),
            user_dir,
        }
    }

    /// Resolve paths from the current directory and the user's home.
    pub fn discover() -> Result<Self, Error> {
        let project_root = std::env::current_dir()?;
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        Ok(Self::new(&project_root, &home))
    }

    pub fn is_initialized(&self) -> bool {
        self.state_dir.is_dir()
    }

    pub fn require_initialized(&self) -> Result<(), Error> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized(self.state_dir.clone()))
        }
    }
}

/// Tool settings from `~/.git-ticket/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub chat: ChatSettings,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Tag between the hashes in `#rt#00123: subject`.
    #[serde(default = "default_system")]
    pub system: String,

    /// Tracker executable.
    #[serde(default = "default_tracker_command")]
    pub command: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            system: default_system(),
            command: default_tracker_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Upper bound for connecting and delivering one blast.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ChatSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_system() -> String {
    "rt".to_string()
}

fn default_tracker_command() -> String {
    "rt".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            chat: ChatSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Chat connection parameters from `~/.git-ticket/chat.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Client identifier announced to the server.
    pub client: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    /// Base64 encoded at rest.
    pub password: String,
    pub nickname: String,
    #[serde(default)]
    pub tls: bool,
}

impl ChatConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "chat config {} not found",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn decoded_password(&self) -> Result<String, Error> {
        let bytes = STANDARD
            .decode(self.password.trim())
            .map_err(|e| Error::Config(format!("chat password is not valid base64: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|_| Error::Config("chat password is not valid UTF-8".to_string()))
    }
}

/// Short names for chat addresses, from `~/.git-ticket/aliases.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AliasTable {
    #[serde(default)]
    pub group: BTreeMap<String, String>,

    #[serde(default)]
    pub user: BTreeMap<String, String>,
}

impl AliasTable {
    /// Missing or unreadable alias files mean "no aliases".
    pub fn load(path: &Path) -> Self {
        read_json_or_default(path)
    }
}
