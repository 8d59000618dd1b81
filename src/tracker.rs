//! Ticket subject lookup through the tracker CLI.

use std::process::Command;

use tracing::debug;

use crate::error::Error;
use crate::ticket::TicketId;

/// Source of one-line ticket subjects.
pub trait TicketTracker {
    fn subject(&self, ticket: TicketId) -> Result<String, Error>;
}

/// Request Tracker command line client (`rt show ...`).
#[derive(Debug, Clone)]
pub struct RtCli {
    program: String,
}

impl RtCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TicketTracker for RtCli {
    fn subject(&self, ticket: TicketId) -> Result<String, Error> {
        debug!(ticket = %ticket, program = %self.program, "Looking up ticket subject");

        let id = ticket.to_string();
        let output = Command::new(&self.program)
            .args(["show", "-t", "ticket", id.as_str(), "-f", "subject,id"])
            .output()
            .map_err(|e| Error::tracker(ticket, format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tracker(
                ticket,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        parse_subject(ticket, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Take the value after the first colon on the first output line.
pub fn parse_subject(ticket: TicketId, output: &str) -> Result<String, Error> {
    let line = output.lines().next().unwrap_or("");
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .ok_or_else(|| Error::tracker(ticket, format!("unexpected tracker output: {:?}", line)))
}
