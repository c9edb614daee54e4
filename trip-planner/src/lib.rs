pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use services::{ChatBackend, GeoCatalog, PlannerSessions};
use std::sync::Arc;

/// Shared application state: the geographic catalog, the chat backend and live planner sessions.
#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<GeoCatalog>,
    pub chat_backend: Arc<dyn ChatBackend>,
    pub sessions: Arc<PlannerSessions>,
}

impl AppState {
    pub fn new(
        geo: Arc<GeoCatalog>,
        chat_backend: Arc<dyn ChatBackend>,
        sessions: Arc<PlannerSessions>,
    ) -> Self {
        Self {
            geo,
            chat_backend,
            sessions,
        }
    }
}
