use axum::{Json, extract::State};
use chrono::Utc;
use tracing::debug;

use crate::{
    error::AppError,
    message::{HealthMetrics, HealthResponse},
    state::SharedState,
};

pub const SERVICE_NAME: &str = "chat-microservice";

pub async fn health_handler(
    State(state): State<SharedState>,
) -> Result<Json<HealthResponse>, AppError> {
    debug!("health check requested");
    let active_sessions = state.chat.get_session_count().await?;

    Ok(Json(HealthResponse {
        status: "UP".to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: HealthMetrics { active_sessions },
    }))
}
