//! Error types for git-ticket.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not initialized: {} does not exist. Run 'git-ticket init' in this directory first.", .0.display())]
    NotInitialized(PathBuf),

    #[error("Already initialized: {} exists", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Invalid ticket id: {0:?}")]
    InvalidTicketId(String),

    #[error("Invalid blast: {0}")]
    InvalidBlast(String),

    #[error("Ticket tracker failed for ticket {ticket}: {message}")]
    Tracker { ticket: String, message: String },

    #[error("git {operation} failed: {message}")]
    Vcs {
        operation: &'static str,
        message: String,
    },

    #[error("Chat {operation} failed: {message}")]
    Chat {
        operation: &'static str,
        message: String,
    },

    #[error("Chat delivery timed out after {0:?}")]
    ChatTimeout(Duration),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl Error {
    pub fn tracker(ticket: impl ToString, message: impl Into<String>) -> Self {
        Self::Tracker {
            ticket: ticket.to_string(),
            message: message.into(),
        }
    }

    pub fn vcs(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Vcs {
            operation,
            message: message.into(),
        }
    }

    pub fn chat(operation: &'static str, message: impl ToString) -> Self {
        Self::Chat {
            operation,
            message: message.to_string(),
        }
    }
}
