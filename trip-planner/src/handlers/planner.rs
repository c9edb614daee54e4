//! HTMX endpoints behind the planner form.
//!
//! Select changes answer with a re-rendered form panel so dependent selects
//! refresh. Date and interest edits answer 204. Generating a plan answers with
//! the transcript and debug panel.

use crate::middleware::planner::{ActivePlanner, PLANNER_ID_KEY};
use crate::models::view::{FormView, TranscriptView};
use crate::models::Region;
use crate::services::{orchestrator, PlanOutcome};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Form,
};
use chrono::NaiveDate;
use planner_core::error::AppError;
use serde::Deserialize;
use validator::Validate;

#[derive(Template)]
#[template(path = "partials/form.html")]
pub struct FormPanelTemplate {
    pub form: FormView,
}

#[derive(Template)]
#[template(path = "partials/transcript.html")]
pub struct TranscriptTemplate {
    pub transcript: TranscriptView,
    pub clear_notice: bool,
}

#[derive(Deserialize)]
pub struct CountryForm {
    #[serde(default)]
    pub country: String,
}

#[derive(Deserialize)]
pub struct StateForm {
    #[serde(default)]
    pub state: String,
}

#[derive(Deserialize)]
pub struct CityForm {
    #[serde(default)]
    pub city: String,
}

#[derive(Deserialize)]
pub struct DatesForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Deserialize, Validate)]
pub struct InterestsForm {
    #[serde(default)]
    #[validate(length(max = 500, message = "Interests are limited to 500 characters"))]
    pub interests: String,
}

#[derive(Deserialize, Validate)]
pub struct GenerateForm {
    /// Latest interests text, sent along so an edit still in the debounce window counts.
    #[validate(length(max = 500, message = "Interests are limited to 500 characters"))]
    pub interests: Option<String>,
}

/// Empty values model the "-- choose --" option. Anything else must resolve.
fn resolve(
    kind: &str,
    value: &str,
    lookup: impl FnOnce(&str) -> Option<Region>,
) -> Result<Option<Region>, AppError> {
    if value.is_empty() {
        return Ok(None);
    }
    lookup(value)
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Unknown {} '{}'", kind, value)))
}

fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, AppError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid {} date '{}'", field, value)))
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn select_country(
    State(state): State<AppState>,
    planner: ActivePlanner,
    Form(form): Form<CountryForm>,
) -> Result<FormPanelTemplate, AppError> {
    let country = resolve("country", &form.country, |code| state.geo.country(code))?;

    let mut session = planner.session.lock().await;
    session.selection.set_country(country);

    Ok(FormPanelTemplate {
        form: FormView::build(&state.geo, &session),
    })
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn select_state(
    State(state): State<AppState>,
    planner: ActivePlanner,
    Form(form): Form<StateForm>,
) -> Result<FormPanelTemplate, AppError> {
    let mut session = planner.session.lock().await;

    let selected = match session.selection.country() {
        Some(country) => resolve("state", &form.state, |code| state.geo.state(country, code))?,
        None => resolve("state", &form.state, |_| None)?,
    };
    session.selection.set_state(selected);

    Ok(FormPanelTemplate {
        form: FormView::build(&state.geo, &session),
    })
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn select_city(
    State(state): State<AppState>,
    planner: ActivePlanner,
    Form(form): Form<CityForm>,
) -> Result<FormPanelTemplate, AppError> {
    let mut session = planner.session.lock().await;

    let selected = match (session.selection.country(), session.selection.state()) {
        (Some(country), Some(region)) => resolve("city", &form.city, |name| {
            state.geo.city(country, region, name)
        })?,
        _ => resolve("city", &form.city, |_| None)?,
    };
    session.selection.set_city(selected);

    Ok(FormPanelTemplate {
        form: FormView::build(&state.geo, &session),
    })
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn set_dates(
    planner: ActivePlanner,
    Form(form): Form<DatesForm>,
) -> Result<StatusCode, AppError> {
    let start = parse_date("start", &form.start)?;
    let end = parse_date("end", &form.end)?;

    planner.session.lock().await.selection.set_date_range(start, end);

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn set_interests(
    planner: ActivePlanner,
    Form(form): Form<InterestsForm>,
) -> Result<StatusCode, AppError> {
    form.validate()?;

    planner.session.lock().await.selection.set_interests(form.interests);

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn generate(
    State(state): State<AppState>,
    planner: ActivePlanner,
    Form(form): Form<GenerateForm>,
) -> Result<TranscriptTemplate, AppError> {
    form.validate()?;

    let outcome = orchestrator::submit_with_interests(
        planner.session.clone(),
        state.chat_backend.clone(),
        form.interests,
    )
    .await?;
    match outcome {
        PlanOutcome::Replied => tracing::info!("Itinerary generated"),
        PlanOutcome::BackendFailed => tracing::warn!("Itinerary backend call failed"),
    }

    let session = planner.session.lock().await;
    Ok(TranscriptTemplate {
        transcript: TranscriptView::build(&session),
        clear_notice: true,
    })
}

/// End the planner session; the next visit starts from a blank form.
#[tracing::instrument(skip_all, fields(planner_id = %planner.id))]
pub async fn reset(
    State(state): State<AppState>,
    planner: ActivePlanner,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.remove(&planner.id);
    planner
        .cookie_session
        .remove::<uuid::Uuid>(PLANNER_ID_KEY)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", HeaderValue::from_static("/"));
    Ok((StatusCode::OK, headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_clears_without_lookup() {
        let resolved = resolve("country", "", |_| panic!("lookup must not run")).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn unknown_value_is_a_bad_request() {
        let err = resolve("country", "FR", |_| None).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.user_message().contains("Unknown country 'FR'"));
    }

    #[test]
    fn dates_parse_iso_format_only() {
        assert_eq!(
            parse_date("start", "2024-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert!(parse_date("start", "").unwrap().is_none());
        assert!(parse_date("start", "06/01/2024").is_err());
    }

    #[test]
    fn overlong_interests_fail_validation() {
        let form = InterestsForm {
            interests: "x".repeat(501),
        };
        assert!(form.validate().is_err());

        let form = GenerateForm {
            interests: Some("museums".to_string()),
        };
        assert!(form.validate().is_ok());
    }
}
