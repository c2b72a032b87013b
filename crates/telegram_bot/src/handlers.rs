use std::sync::Arc;

use engine::{Engine, EngineError, NewTransaction};
use teloxide::types::{Update, UpdateKind};

use crate::{
    BotError, ConfigParameters,
    commands::{Command, parse_command},
    outbox::{Notifier, Outbox},
    parsing::parse_transaction,
    ui,
};

/// Routes inbound messages to command handlers or to the transaction
/// parser and produces the reply text.
///
/// Each message is handled on its own: the only shared state is the ledger.
pub struct Dispatcher<O> {
    engine: Arc<Engine>,
    notifier: Notifier<O>,
    cfg: ConfigParameters,
}

impl<O: Outbox> Dispatcher<O> {
    pub fn new(engine: Arc<Engine>, notifier: Notifier<O>, cfg: ConfigParameters) -> Self {
        Self {
            engine,
            notifier,
            cfg,
        }
    }

    pub fn notifier(&self) -> &Notifier<O> {
        &self.notifier
    }

    /// Handles a Telegram update and sends the reply to the originating chat.
    ///
    /// Updates that carry no text message are ignored.
    pub async fn handle_update(&self, update: &Update) -> Result<(), BotError> {
        let UpdateKind::Message(msg) = &update.kind else {
            tracing::debug!("ignoring non-message update");
            return Ok(());
        };
        let Some(text) = msg.text() else {
            return Ok(());
        };
        let Some(from) = msg.from.as_ref() else {
            tracing::debug!("ignoring message without sender");
            return Ok(());
        };
        let Ok(user_id) = i64::try_from(from.id.0) else {
            tracing::warn!("sender id {} does not fit the ledger", from.id);
            return Ok(());
        };

        tracing::info!("Received message from user {user_id}: {text}");

        let Some(reply) = self.dispatch(user_id, text).await else {
            return Ok(());
        };
        for chunk in ui::split_message(&reply) {
            self.notifier.outbox().send(msg.chat.id, chunk).await?;
        }
        Ok(())
    }

    /// Produces the reply for `text` sent by `user_id`.
    ///
    /// Returns `None` when the sender is not allowed to use the bot.
    pub async fn dispatch(&self, user_id: i64, text: &str) -> Option<String> {
        if !self.is_allowed(user_id) {
            tracing::debug!("ignoring message from user {user_id}: not allowed");
            return None;
        }

        let reply = match parse_command(text, &self.cfg.defaults) {
            Some(Ok(cmd)) => self.handle_command(user_id, cmd).await,
            Some(Err(err)) => {
                tracing::debug!("invalid command arguments from user {user_id}: {err:?}");
                Ok(err.to_string())
            }
            None => self.handle_transaction(user_id, text).await,
        };

        Some(match reply {
            Ok(reply) => reply,
            Err(err) => self.failure(user_id, err).await,
        })
    }

    async fn handle_command(&self, user_id: i64, cmd: Command) -> Result<String, EngineError> {
        match cmd {
            Command::Start => Ok(ui::welcome_text().to_string()),
            Command::Help => Ok(ui::help_text().to_string()),
            Command::Summary { days } => {
                let summary = self.engine.summary(user_id, days).await?;
                Ok(ui::render_summary(days, &summary))
            }
            Command::Transactions { limit } => {
                let txs = self.engine.list_recent(user_id, limit).await?;
                Ok(ui::render_transactions(limit, &txs, self.cfg.timezone))
            }
            Command::Delete { id } => {
                if self.engine.delete(id, user_id).await? {
                    tracing::info!("user {user_id} deleted transaction {id}");
                    Ok(ui::render_deleted(id))
                } else {
                    Ok(ui::DELETE_REFUSED.to_string())
                }
            }
            Command::Unknown(name) => {
                tracing::debug!("unknown command {name} from user {user_id}");
                Ok(ui::UNKNOWN_COMMAND.to_string())
            }
        }
    }

    async fn handle_transaction(&self, user_id: i64, text: &str) -> Result<String, EngineError> {
        let parsed = match parse_transaction(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!("rejected transaction from user {user_id}: {err}");
                return Ok(ui::render_parse_error(&err));
            }
        };

        let draft = NewTransaction::new(
            user_id,
            parsed.amount,
            parsed.kind,
            Some(parsed.category),
            parsed.description,
        )?;
        let stored = self.engine.insert(draft).await?;
        tracing::info!("user {user_id} added transaction {}", stored.id);
        Ok(ui::render_created(&stored))
    }

    /// Maps an engine error to the reply shown to the user.
    ///
    /// Storage failures are logged and reported to the operator; the user
    /// only sees a generic message.
    async fn failure(&self, user_id: i64, err: EngineError) -> String {
        if !err.is_storage() {
            tracing::debug!("rejected input from user {user_id}: {err}");
            return format!("❌ {err}");
        }

        tracing::error!("storage failure while serving user {user_id}: {err}");
        self.notifier
            .notify(format!("⚠️ Storage failure while serving user {user_id}: {err}"))
            .await;
        ui::INTERNAL_ERROR.to_string()
    }

    fn is_allowed(&self, user_id: i64) -> bool {
        match &self.cfg.allowed_users {
            None => true,
            Some(ids) => ids.contains(&user_id),
        }
    }
}
