use crate::middleware::planner::ActivePlanner;
use crate::models::view::{FormView, TranscriptView};
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: FormView,
    pub transcript: TranscriptView,
    pub clear_notice: bool,
}

pub async fn index(State(state): State<AppState>, planner: ActivePlanner) -> impl IntoResponse {
    let session = planner.session.lock().await;

    IndexTemplate {
        form: FormView::build(&state.geo, &session),
        transcript: TranscriptView::build(&session),
        clear_notice: false,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
