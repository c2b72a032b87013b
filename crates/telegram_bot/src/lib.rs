//! Telegram bot.
//!
//! The bot receives updates through a webhook (see the `server` crate),
//! turns each text message into a ledger operation and replies in the
//! originating chat.

use std::sync::Arc;

use chrono_tz::Tz;
use engine::Engine;
use teloxide::types::ChatId;

pub use commands::{CommandDefaults, SUMMARY_DAYS, TRANSACTIONS_LIMIT};
pub use handlers::Dispatcher;
pub use outbox::{Notifier, Outbox, TelegramOutbox};

mod commands;
mod handlers;
mod outbox;
mod parsing;
mod ui;
pub mod webhook;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("invalid webhook url {0}")]
    InvalidUrl(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Per-deployment knobs shared by every handler.
#[derive(Clone, Debug)]
pub struct ConfigParameters {
    pub defaults: CommandDefaults,
    /// `None` lets everyone in.
    pub allowed_users: Option<Vec<i64>>,
    /// Timezone used to print timestamps. Storage is always UTC.
    pub timezone: Tz,
}

impl Default for ConfigParameters {
    fn default() -> Self {
        Self {
            defaults: CommandDefaults::default(),
            allowed_users: None,
            timezone: Tz::UTC,
        }
    }
}

pub struct Bot {
    outbox: TelegramOutbox,
    admin_chat: Option<ChatId>,
    engine: Arc<Engine>,
    cfg: ConfigParameters,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub fn telegram(&self) -> &teloxide::Bot {
        self.outbox.bot()
    }

    pub fn notifier(&self) -> Notifier<TelegramOutbox> {
        Notifier::new(self.outbox.clone(), self.admin_chat)
    }

    /// Builds the update dispatcher backed by the Telegram API.
    pub fn dispatcher(&self) -> Dispatcher<TelegramOutbox> {
        Dispatcher::new(self.engine.clone(), self.notifier(), self.cfg.clone())
    }

    /// Registers `url` as the webhook for this bot.
    pub async fn register_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), BotError> {
        webhook::set_webhook(self.telegram(), url, secret_token).await
    }

    /// Tells the operator chat that the bot is up. Best effort.
    pub async fn announce_startup(&self) {
        self.notifier().notify(ui::STARTUP).await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    admin_chat: Option<i64>,
    allowed_users: Option<Vec<i64>>,
    defaults: CommandDefaults,
    timezone: Option<String>,
    engine: Option<Arc<Engine>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn admin_chat(mut self, chat_id: Option<i64>) -> BotBuilder {
        self.admin_chat = chat_id;
        self
    }

    pub fn allowed_users(mut self, allowed_users: Vec<i64>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users);
        }
        self
    }

    pub fn defaults(mut self, defaults: CommandDefaults) -> BotBuilder {
        self.defaults = defaults;
        self
    }

    pub fn timezone(mut self, timezone: &str) -> BotBuilder {
        self.timezone = Some(timezone.to_string());
        self
    }

    pub fn engine(mut self, engine: Arc<Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<Bot, BotError> {
        tracing::info!("Initializing telegram bot...");

        if self.token.is_empty() {
            return Err(BotError::Config("telegram token is missing".to_string()));
        }
        let engine = self
            .engine
            .ok_or_else(|| BotError::Config("engine is missing".to_string()))?;
        self.defaults.validate()?;
        let timezone = match self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|err| BotError::Config(format!("unknown timezone {name}: {err}")))?,
            None => Tz::UTC,
        };

        Ok(Bot {
            outbox: TelegramOutbox::new(teloxide::Bot::new(&self.token)),
            admin_chat: self.admin_chat.map(ChatId),
            engine,
            cfg: ConfigParameters {
                defaults: self.defaults,
                allowed_users: self.allowed_users,
                timezone,
            },
        })
    }
}
