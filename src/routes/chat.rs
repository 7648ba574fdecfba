use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::AppError,
    message::{CreateSessionRequest, CreateSessionResponse, SendMessageRequest, SendMessageResponse},
    models::Message,
    state::SharedState,
};

pub async fn create_session_handler(
    State(state): State<SharedState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    info!("received request to create chat session");
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .chat
        .create_session(payload.initial_message.as_deref())
        .await?;

    info!(session_id = %session.id, "session created");
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn send_message_handler(
    State(state): State<SharedState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let Json(payload) = payload?;
    let request = payload.validate()?;
    info!(session_id = %request.session_id, "received message");

    let message = state
        .chat
        .send_message(&request.session_id, &request.content, &request.sender)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_history_handler(
    State(state): State<SharedState>,
    session_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Message>>, AppError> {
    let Path(session_id) = session_id?;
    let messages = state.chat.get_chat_history(&session_id).await?;
    info!(%session_id, count = messages.len(), "history returned");
    Ok(Json(messages))
}
