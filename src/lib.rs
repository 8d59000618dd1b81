//! git-ticket library.
//!
//! Commit messages composed from ticket tracker subjects, plus queued chat
//! blasts delivered after commit.

pub mod chat;
pub mod cli;
pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod state;
pub mod ticket;
pub mod tracker;
pub mod vcs;

pub use error::Error;
