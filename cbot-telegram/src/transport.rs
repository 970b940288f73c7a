//! Teloxide-backed implementation of [`cbot_core::ChatClient`]. Production code
//! talks to Telegram; tests substitute an offline ChatClient impl.

use async_trait::async_trait;
use cbot_core::{BotError, ChatClient, Result};
use teloxide::prelude::*;
use tracing::{debug, info};

/// Thin wrapper around teloxide::Bot implementing the transport trait.
pub struct TelegramChat {
    bot: teloxide::Bot,
}

impl TelegramChat {
    /// Creates a transport using the given bot token. No network I/O happens
    /// until [`ChatClient::connect_and_run`].
    pub fn new(token: String) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl ChatClient for TelegramChat {
    async fn connect_and_run(&self) -> Result<()> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::Chat(e.to_string()))?;
        info!(username = me.username(), "logged in");

        teloxide::repl(self.bot.clone(), |msg: Message| async move {
            debug!(chat_id = msg.chat.id.0, "incoming message");
            respond(())
        })
        .await;
        Ok(())
    }

    async fn send_message(&self, channel_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(channel_id), text.to_string())
            .await
            .map_err(|e| BotError::Chat(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_chat_new() {
        let _chat = TelegramChat::new("dummy_token".to_string());
    }
}
