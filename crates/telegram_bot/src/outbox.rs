//! Outbound messages: replies to users and notices to the operator chat.

use std::future::Future;

use teloxide::{prelude::*, types::ChatId};

use crate::BotError;

/// Delivers a text message to a chat.
///
/// The Telegram implementation is [`TelegramOutbox`]; tests plug in a
/// recorder instead.
pub trait Outbox: Clone + Send + Sync + 'static {
    fn send(
        &self,
        chat_id: ChatId,
        text: String,
    ) -> impl Future<Output = Result<(), BotError>> + Send;
}

/// Sends messages through the Telegram Bot API.
#[derive(Clone, Debug)]
pub struct TelegramOutbox {
    bot: teloxide::Bot,
}

impl TelegramOutbox {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &teloxide::Bot {
        &self.bot
    }
}

impl Outbox for TelegramOutbox {
    async fn send(&self, chat_id: ChatId, text: String) -> Result<(), BotError> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }
}

/// Best-effort notices to the operator chat.
///
/// Without an operator chat configured every notice is dropped. Delivery
/// failures are logged and never propagated.
#[derive(Clone, Debug)]
pub struct Notifier<O> {
    outbox: O,
    admin_chat: Option<ChatId>,
}

impl<O: Outbox> Notifier<O> {
    pub fn new(outbox: O, admin_chat: Option<ChatId>) -> Self {
        Self { outbox, admin_chat }
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub async fn notify(&self, text: impl Into<String>) {
        let Some(chat_id) = self.admin_chat else {
            return;
        };
        if let Err(err) = self.outbox.send(chat_id, text.into()).await {
            tracing::error!("failed to send admin notification: {err}");
        }
    }
}
