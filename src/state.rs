// src/state.rs
use std::sync::Arc;

use crate::db::Database;
use crate::services::ChatService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            chat: ChatService::new(db),
        }
    }
}
