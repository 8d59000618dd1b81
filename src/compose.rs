//! Commit message composition.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::ticket::{TicketId, NO_TICKET_SUBJECT};
use crate::tracker::TicketTracker;

/// Builds `#<system>#<id>: <subject>` lines from ticket ids.
pub struct CommitComposer<'a> {
    system: &'a str,
    tracker: &'a dyn TicketTracker,
}

impl<'a> CommitComposer<'a> {
    pub fn new(system: &'a str, tracker: &'a dyn TicketTracker) -> Self {
        Self { system, tracker }
    }

    /// Subject for one ticket; the tracker is never asked about ticket 0.
    pub fn subject(&self, ticket: TicketId) -> Result<String, Error> {
        if ticket.is_none() {
            return Ok(NO_TICKET_SUBJECT.to_string());
        }
        self.tracker.subject(ticket)
    }

    pub fn line(&self, ticket: TicketId) -> Result<String, Error> {
        Ok(format!(
            "#{}#{}: {}",
            self.system,
            ticket.label(),
            self.subject(ticket)?
        ))
    }

    /// One line per ticket, in input order.
    pub fn compose(&self, tickets: &[TicketId]) -> Result<String, Error> {
        let lines = tickets
            .iter()
            .map(|&ticket| self.line(ticket))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    /// Compose and write the message to `path` for `git commit -F`.
    pub fn write_message(&self, tickets: &[TicketId], path: &Path) -> Result<String, Error> {
        let message = self.compose(tickets)?;
        fs::write(path, &message)?;
        debug!(path = %path.display(), lines = tickets.len(), "Wrote commit message");
        Ok(message)
    }
}
