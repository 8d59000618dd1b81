//! Chat delivery seam.
//!
//! The dispatcher only talks to these traits; [`irc::IrcConnector`] is the
//! production implementation.

pub mod irc;

pub use self::irc::IrcConnector;

use async_trait::async_trait;

use crate::error::Error;

/// An authenticated chat session.
#[async_trait]
pub trait ChatSession: Send {
    /// Point-to-point message to a user address.
    async fn send_direct(&mut self, to: &str, body: &str) -> Result<(), Error>;

    /// Room message. Announces presence in the room before the first send.
    async fn send_room(&mut self, room: &str, body: &str) -> Result<(), Error>;

    /// Flush outstanding messages and disconnect.
    async fn close(self: Box<Self>) -> Result<(), Error>;
}

/// Opens chat sessions. Only called when something needs delivering.
#[async_trait]
pub trait ChatConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn ChatSession>, Error>;
}
