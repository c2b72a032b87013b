//! Bodies exchanged on the HTTP surface.

use serde::{Deserialize, Serialize};

pub mod webhook {
    use super::*;

    /// Outcome reported back to Telegram for a webhook delivery.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Status {
        Ok,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WebhookAck {
        pub status: Status,
    }

    impl WebhookAck {
        pub fn ok() -> Self {
            Self { status: Status::Ok }
        }
    }
}

pub mod health {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum HealthStatus {
        Healthy,
    }

    /// Body of `GET /`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Banner {
        pub message: String,
        pub status: HealthStatus,
    }

    /// Body of `GET /health`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Health {
        pub status: HealthStatus,
        pub service: String,
    }
}
