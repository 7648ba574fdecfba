// src/routes/mod.rs
pub mod chat;
pub mod health;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{create_session_handler, get_history_handler, send_message_handler};
use health::health_handler;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let chat_routes = Router::new()
        .route("/session", post(create_session_handler))
        .route("/message", post(send_message_handler))
        .route("/history/{session_id}", get(get_history_handler));

    Router::new()
        .nest("/chat", chat_routes)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
}
