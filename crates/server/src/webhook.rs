//! The endpoint Telegram delivers updates to.

use api_types::webhook::WebhookAck;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use telegram_bot::Outbox;
use teloxide::types::Update;

use crate::{ServerError, server::ServerState};

/// Handles one update and acknowledges it.
///
/// Delivery failures of the reply are logged but still acknowledged with
/// 200: a non-2xx status makes Telegram redeliver the update, which would
/// store the transaction twice.
pub async fn receive<O: Outbox>(
    State(state): State<ServerState<O>>,
    payload: Result<Json<Update>, JsonRejection>,
) -> Result<Json<WebhookAck>, ServerError> {
    let Json(update) = payload?;
    tracing::debug!("webhook update {}", update.id.0);

    if let Err(err) = state.dispatcher.handle_update(&update).await {
        tracing::error!("failed to reply to update {}: {err}", update.id.0);
    }

    Ok(Json(WebhookAck::ok()))
}
