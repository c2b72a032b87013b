use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod health;
mod server;
mod webhook;

pub mod types {
    pub mod webhook {
        pub use api_types::webhook::{Status, WebhookAck};
    }

    pub mod health {
        pub use api_types::health::{Banner, Health, HealthStatus};
    }
}

/// Name reported by `GET /health`.
pub const SERVICE_NAME: &str = "moneybot";

pub enum ServerError {
    /// Missing or wrong webhook secret token.
    Unauthorized,
    /// The request body could not be decoded.
    Rejected(JsonRejection),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ServerError::Rejected(rejection) => {
                tracing::debug!("rejected webhook body: {rejection}");
                (rejection.status(), rejection.body_text())
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value)
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn unauthorized_maps_to_401_with_json_body() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = res.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({"error": "unauthorized"}));
    }
}
