//! IRC chat sessions.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use ::irc::client::prelude::{Client, Command, Config as IrcConfig, Response};
use ::irc::client::ClientStream;
use tracing::{debug, info};

use super::{ChatConnector, ChatSession};
use crate::config::ChatConfig;
use crate::error::Error;

const QUIT_MESSAGE: &str = "git-ticket";

/// Connects using the chat config file, read at connect time.
#[derive(Debug, Clone)]
pub struct IrcConnector {
    config_path: PathBuf,
}

impl IrcConnector {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }
}

/// Map the stored chat config onto the IRC client config.
fn client_config(chat: &ChatConfig) -> Result<IrcConfig, Error> {
    Ok(IrcConfig {
        nickname: Some(chat.nickname.clone()),
        username: Some(chat.username.clone()),
        realname: Some(chat.client.clone()),
        server: Some(chat.server.clone()),
        port: Some(chat.port),
        password: Some(chat.decoded_password()?),
        use_tls: Some(chat.tls),
        ..IrcConfig::default()
    })
}

#[async_trait]
impl ChatConnector for IrcConnector {
    async fn connect(&self) -> Result<Box<dyn ChatSession>, Error> {
        let chat = ChatConfig::load(&self.config_path)?;
        let config = client_config(&chat)?;

        debug!(server = %chat.server, port = chat.port, nickname = %chat.nickname, "Connecting to chat");
        let mut client = Client::from_config(config)
            .await
            .map_err(|e| Error::chat("connect", e))?;
        client
            .identify()
            .map_err(|e| Error::chat("authenticate", e))?;
        let mut stream = client.stream().map_err(|e| Error::chat("connect", e))?;

        wait_for_welcome(&mut stream).await?;
        info!(server = %chat.server, "Connected to chat");

        Ok(Box::new(IrcSession {
            client,
            stream,
            joined: HashSet::new(),
        }))
    }
}

/// Drive the connection until registration succeeds or is refused.
async fn wait_for_welcome(stream: &mut ClientStream) -> Result<(), Error> {
    while let Some(message) = stream
        .next()
        .await
        .transpose()
        .map_err(|e| Error::chat("authenticate", e))?
    {
        match message.command {
            Command::Response(Response::RPL_WELCOME, _) => return Ok(()),
            Command::Response(Response::ERR_PASSWDMISMATCH, _) => {
                return Err(Error::chat("authenticate", "password rejected"));
            }
            Command::Response(Response::ERR_NICKNAMEINUSE, _) => {
                return Err(Error::chat("authenticate", "nickname already in use"));
            }
            Command::ERROR(reason) => return Err(Error::chat("authenticate", reason)),
            _ => {}
        }
    }

    Err(Error::chat(
        "authenticate",
        "connection closed before registration completed",
    ))
}

pub struct IrcSession {
    client: Client,
    stream: ClientStream,
    joined: HashSet<String>,
}

impl IrcSession {
    /// IRC messages are single line.
    fn privmsg(&self, target: &str, body: &str) -> Result<(), Error> {
        for line in body.lines().filter(|line| !line.trim().is_empty()) {
            self.client
                .send_privmsg(target, line)
                .map_err(|e| Error::chat("send", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ChatSession for IrcSession {
    async fn send_direct(&mut self, to: &str, body: &str) -> Result<(), Error> {
        debug!(to, "Sending direct message");
        self.privmsg(to, body)
    }

    async fn send_room(&mut self, room: &str, body: &str) -> Result<(), Error> {
        if !self.joined.contains(room) {
            self.client
                .send_join(room)
                .map_err(|e| Error::chat("join", e))?;
            self.joined.insert(room.to_string());
        }
        debug!(room, "Sending room message");
        self.privmsg(room, body)
    }

    async fn close(self: Box<Self>) -> Result<(), Error> {
        let IrcSession {
            client, mut stream, ..
        } = *self;

        client
            .send_quit(QUIT_MESSAGE)
            .map_err(|e| Error::chat("disconnect", e))?;

        // Queued messages are written while the stream is polled.
        while let Some(message) = stream.next().await {
            message.map_err(|e| Error::chat("send", e))?;
        }

        info!("Disconnected from chat");
        Ok(())
    }
}
