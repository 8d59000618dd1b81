//! Sequences a non-init invocation: store blast, commit, send blast.

use tracing::{debug, info};

use crate::chat::ChatConnector;
use crate::cli::Request;
use crate::compose::CommitComposer;
use crate::config::{AliasTable, Config, Paths};
use crate::dispatch::BroadcastDispatcher;
use crate::error::Error;
use crate::state::{BlastQueue, HistoryStore};
use crate::ticket::TicketId;
use crate::tracker::TicketTracker;
use crate::vcs::VersionControl;

pub struct CommandRouter<'a> {
    paths: &'a Paths,
    config: &'a Config,
    tracker: &'a dyn TicketTracker,
    vcs: &'a dyn VersionControl,
    connector: &'a dyn ChatConnector,
}

impl<'a> CommandRouter<'a> {
    pub fn new(
        paths: &'a Paths,
        config: &'a Config,
        tracker: &'a dyn TicketTracker,
        vcs: &'a dyn VersionControl,
        connector: &'a dyn ChatConnector,
    ) -> Self {
        Self {
            paths,
            config,
            tracker,
            vcs,
            connector,
        }
    }

    pub async fn run(&self, request: &Request) -> Result<(), Error> {
        self.paths.require_initialized()?;

        let queue = BlastQueue::new(self.paths.blast_queue.clone());

        if let Some(spec) = &request.blast {
            let blast = queue.store(spec)?;
            println!(
                "Blast queued for {} recipient(s); it is sent after the next commit.",
                blast.recipients.len()
            );
        }

        self.commit(&request.tickets, request.pull)?;

        if request.send_blast {
            self.send_blast(&queue).await?;
        }

        Ok(())
    }

    /// Compose, record history and commit. Returns the referenced tickets,
    /// or `None` when there was nothing to commit.
    pub fn commit(&self, tickets: &[TicketId], pull: usize) -> Result<Option<Vec<TicketId>>, Error> {
        let history = HistoryStore::new(self.paths.history.clone());

        let mut all = tickets.to_vec();
        if pull > 0 {
            all.extend(history.recent(pull));
        }
        if all.is_empty() {
            debug!("No ticket ids, skipping commit");
            return Ok(None);
        }

        let composer = CommitComposer::new(&self.config.tracker.system, self.tracker);
        composer.write_message(&all, &self.paths.commit_message)?;
        history.record(tickets)?;

        info!(tickets = all.len(), "Committing");
        self.vcs.commit(&self.paths.commit_message)?;
        Ok(Some(all))
    }

    async fn send_blast(&self, queue: &BlastQueue) -> Result<(), Error> {
        let aliases = AliasTable::load(&self.paths.aliases);
        let dispatcher = BroadcastDispatcher::new(
            queue,
            &aliases,
            self.vcs,
            self.connector,
            self.config.chat.timeout(),
        );

        if let Some(delivery) = dispatcher.send().await? {
            println!(
                "Blast sent to {} room(s) and {} user(s).",
                delivery.rooms, delivery.direct
            );
        }
        Ok(())
    }
}
