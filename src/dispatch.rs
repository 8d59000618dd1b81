//! Delivery of the pending blast.
//!
//! Recipients are resolved through the alias table: group aliases become
//! room sends, user aliases and unknown names become direct sends. The queue
//! is only marked drained after every send went through, so a failed
//! delivery stays pending for the next attempt.

use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::ChatConnector;
use crate::config::AliasTable;
use crate::error::Error;
use crate::state::BlastQueue;
use crate::vcs::VersionControl;

/// A recipient after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Group(String),
    User(String),
    /// Not in either alias table; delivered directly to the literal name.
    Unknown(String),
}

impl Target {
    pub fn resolve(recipient: &str, aliases: &AliasTable) -> Self {
        if let Some(address) = aliases.group.get(recipient) {
            Target::Group(address.clone())
        } else if let Some(address) = aliases.user.get(recipient) {
            Target::User(address.clone())
        } else {
            Target::Unknown(recipient.to_string())
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Target::Group(address) | Target::User(address) | Target::Unknown(address) => address,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Target::Group(_))
    }
}

/// Summary of a delivered blast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub blast_id: Uuid,
    pub rooms: usize,
    pub direct: usize,
}

pub struct BroadcastDispatcher<'a> {
    queue: &'a BlastQueue,
    aliases: &'a AliasTable,
    vcs: &'a dyn VersionControl,
    connector: &'a dyn ChatConnector,
    timeout: Duration,
}

impl<'a> BroadcastDispatcher<'a> {
    pub fn new(
        queue: &'a BlastQueue,
        aliases: &'a AliasTable,
        vcs: &'a dyn VersionControl,
        connector: &'a dyn ChatConnector,
        timeout: Duration,
    ) -> Self {
        Self {
            queue,
            aliases,
            vcs,
            connector,
            timeout,
        }
    }

    /// Deliver the head blast if one is pending.
    ///
    /// Returns `None` when the queue is drained. Errors leave the queue
    /// untouched.
    pub async fn send(&self) -> Result<Option<Delivery>, Error> {
        let Some(blast) = self.queue.pending() else {
            debug!("No pending blast");
            return Ok(None);
        };

        let targets: Vec<Target> = blast
            .recipients
            .iter()
            .map(|recipient| Target::resolve(recipient, self.aliases))
            .collect();
        for target in &targets {
            if let Target::Unknown(name) = target {
                warn!(recipient = %name, "No alias found, sending directly");
            }
        }

        let body = format!("{}\n\n{}", blast.message, self.vcs.last_log_entry()?);

        let (rooms, direct) = tokio::time::timeout(self.timeout, self.deliver(&targets, &body))
            .await
            .map_err(|_| Error::ChatTimeout(self.timeout))??;

        self.queue.mark_drained(Some(blast.id))?;
        info!(blast_id = %blast.id, rooms, direct, "Blast delivered");

        Ok(Some(Delivery {
            blast_id: blast.id,
            rooms,
            direct,
        }))
    }

    async fn deliver(&self, targets: &[Target], body: &str) -> Result<(usize, usize), Error> {
        let mut session = self.connector.connect().await?;
        let mut rooms = 0;
        let mut direct = 0;

        for target in targets.iter().filter(|t| t.is_group()) {
            session.send_room(target.address(), body).await?;
            rooms += 1;
        }
        for target in targets.iter().filter(|t| !t.is_group()) {
            session.send_direct(target.address(), body).await?;
            direct += 1;
        }

        session.close().await?;
        Ok((rooms, direct))
    }
}
