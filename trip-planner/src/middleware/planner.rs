use crate::services::SharedSession;
use crate::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use planner_core::error::AppError;
use tower_sessions::Session;
use uuid::Uuid;

/// Cookie-session key holding the planner session id.
pub const PLANNER_ID_KEY: &str = "planner_id";

/// The planner state bound to the requesting browser, created on first visit.
pub struct ActivePlanner {
    pub id: Uuid,
    pub session: SharedSession,
    pub cookie_session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for ActivePlanner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Session(msg.to_string()))?;

        let existing: Option<Uuid> = cookie_session
            .get(PLANNER_ID_KEY)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;

        if let Some(id) = existing {
            if let Some(session) = state.sessions.get(&id) {
                return Ok(Self {
                    id,
                    session,
                    cookie_session,
                });
            }
            tracing::debug!(planner_id = %id, "Planner session expired, starting a new one");
        }

        let (id, session) = state.sessions.create();
        cookie_session
            .insert(PLANNER_ID_KEY, id)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;

        Ok(Self {
            id,
            session,
            cookie_session,
        })
    }
}
