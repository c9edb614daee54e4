use super::PlanError;
use crate::models::Selection;
use chrono::NaiveDate;

/// Interests used in the prompt when the user left the field empty.
pub const DEFAULT_INTERESTS: &str = "popular mainstream attractions";

/// Interests shown in the transcript summary when the user left the field empty.
pub const NO_INTERESTS: &str = "none";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What is sent upstream and what the transcript shows instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub summary: String,
}

/// Turn a completed selection into the backend prompt and the transcript summary.
///
/// Requires a city and both dates; the end date may not precede the start date.
pub fn compose(selection: &Selection) -> Result<ComposedPrompt, PlanError> {
    let (start, end) = match selection.date_range() {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(PlanError::IncompleteSelection),
    };
    let (country, state, city) = match (selection.country(), selection.state(), selection.city())
    {
        (Some(country), Some(state), Some(city)) => (country, state, city),
        _ => return Err(PlanError::IncompleteSelection),
    };
    if end < start {
        return Err(PlanError::InvalidDateRange);
    }

    let start = format_date(start);
    let end = format_date(end);
    let location = format!("{}, {}, {}", city.name, state.name, country.name);
    let interests = selection.interests().trim();

    let prompt = format!(
        "I want to visit {location}.\n\
         Travel dates: {start} to {end}.\n\
         My interests: {}.\n\
         Please plan an itinerary for me.",
        if interests.is_empty() {
            DEFAULT_INTERESTS
        } else {
            interests
        },
    );

    let summary = format!(
        "📅 Plan: {start} to {end}\n📍 Destination: {location}\n❤️ Interests: {}",
        if interests.is_empty() {
            NO_INTERESTS
        } else {
            interests
        },
    );

    Ok(ComposedPrompt { prompt, summary })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
