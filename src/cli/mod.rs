//! CLI commands for git-ticket.

pub mod gitignore;
pub mod hooks;
pub mod init;
pub mod router;

use clap::{Parser, Subcommand};

use crate::ticket::TicketId;

/// git-ticket - commit messages from ticket subjects, with chat blasts
#[derive(Parser, Debug)]
#[command(name = "git-ticket")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ticket ids referenced by the commit (0 for "no ticket")
    #[arg(value_name = "TICKET")]
    pub tickets: Vec<TicketId>,

    /// Also reference the N most recent tickets from history
    #[arg(short = 'p', value_name = "N", default_value_t = 0)]
    pub pull: usize,

    /// Queue a chat blast: "<recipient>[,<recipient>...][:<message>]"
    #[arg(long, value_name = "SPEC")]
    pub blast: Option<String>,

    /// Deliver the pending blast, if any
    #[arg(long)]
    pub send_blast: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the .git-ticket state directory in this project
    Init,
}

/// Everything a non-init invocation asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub tickets: Vec<TicketId>,
    pub pull: usize,
    pub blast: Option<String>,
    pub send_blast: bool,
}

impl Request {
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty() && self.pull == 0 && self.blast.is_none() && !self.send_blast
    }
}

impl Cli {
    pub fn request(&self) -> Request {
        Request {
            tickets: self.tickets.clone(),
            pull: self.pull,
            blast: self.blast.clone(),
            send_blast: self.send_blast,
        }
    }
}
