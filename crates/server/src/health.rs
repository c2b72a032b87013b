//! Liveness probes. Never guarded.

use api_types::health::{Banner, Health, HealthStatus};
use axum::Json;

use crate::SERVICE_NAME;

pub async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "Money Management Bot is running!".to_string(),
        status: HealthStatus::Healthy,
    })
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: HealthStatus::Healthy,
        service: SERVICE_NAME.to_string(),
    })
}
