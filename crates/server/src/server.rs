use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use telegram_bot::{Dispatcher, Outbox};

use std::sync::Arc;

use crate::{ServerError, health, webhook};

static SECRET_TOKEN_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-telegram-bot-api-secret-token");

pub struct ServerState<O> {
    pub dispatcher: Arc<Dispatcher<O>>,
    /// When set, webhook deliveries must carry it in the secret token header.
    pub secret_token: Option<String>,
}

impl<O> Clone for ServerState<O> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            secret_token: self.secret_token.clone(),
        }
    }
}

/// `TypedHeader` for the Telegram webhook secret
///
/// Telegram sends the token configured with `setWebhook` in
/// "X-Telegram-Bot-Api-Secret-Token".
#[derive(Debug)]
struct SecretTokenHeader(String);

impl Header for SecretTokenHeader {
    fn name() -> &'static axum::http::HeaderName {
        &SECRET_TOKEN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(SecretTokenHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode secret token header"),
        }
    }
}

async fn secret_guard<O: Outbox>(
    State(state): State<ServerState<O>>,
    secret_header: Option<TypedHeader<SecretTokenHeader>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(expected) = &state.secret_token {
        let provided = secret_header.map(|TypedHeader(header)| header.0);
        if provided.as_deref() != Some(expected.as_str()) {
            tracing::warn!("rejected webhook delivery with missing or wrong secret token");
            return Err(ServerError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}

/// Builds the HTTP surface: the webhook under `webhook_path` and the
/// liveness routes.
pub fn router<O: Outbox>(state: ServerState<O>, webhook_path: &str) -> Router {
    let hooks = Router::new()
        .route(webhook_path, post(webhook::receive::<O>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            secret_guard::<O>,
        ))
        .with_state(state);

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .merge(hooks)
}

pub async fn run_with_listener<O: Outbox>(
    state: ServerState<O>,
    webhook_path: &str,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Webhook endpoint: {webhook_path}");

    axum::serve(listener, router(state, webhook_path))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
