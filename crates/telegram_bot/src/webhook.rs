//! Webhook registration against the Telegram Bot API.

use reqwest::Url;
use teloxide::{
    prelude::*,
    types::{Me, WebhookInfo},
};

use crate::BotError;

/// Points Telegram at `url`.
///
/// When `secret_token` is set, Telegram echoes it in the
/// `X-Telegram-Bot-Api-Secret-Token` header of every delivery.
pub async fn set_webhook(
    bot: &teloxide::Bot,
    url: &str,
    secret_token: Option<&str>,
) -> Result<(), BotError> {
    let url = Url::parse(url).map_err(|err| BotError::InvalidUrl(format!("{url}: {err}")))?;
    if url.scheme() != "https" {
        return Err(BotError::InvalidUrl(format!(
            "{url}: Telegram only delivers webhooks over https"
        )));
    }

    let mut request = bot.set_webhook(url.clone());
    if let Some(secret) = secret_token {
        request = request.secret_token(secret.to_string());
    }
    request.await?;

    tracing::info!("Webhook set to {url}");
    Ok(())
}

pub async fn webhook_info(bot: &teloxide::Bot) -> Result<WebhookInfo, BotError> {
    Ok(bot.get_webhook_info().await?)
}

pub async fn delete_webhook(bot: &teloxide::Bot) -> Result<(), BotError> {
    bot.delete_webhook().await?;
    tracing::info!("Webhook removed");
    Ok(())
}

/// Verifies the token by asking Telegram who the bot is.
pub async fn whoami(bot: &teloxide::Bot) -> Result<Me, BotError> {
    Ok(bot.get_me().await?)
}
