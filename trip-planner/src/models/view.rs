//! Render-ready views of a planner session for the askama templates.

use super::{PlannerSession, Region};
use crate::services::GeoCatalog;

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct FormView {
    pub countries: Vec<OptionView>,
    pub states: Vec<OptionView>,
    pub cities: Vec<OptionView>,
    pub states_enabled: bool,
    pub cities_enabled: bool,
    pub start_date: String,
    pub end_date: String,
    pub interests: String,
    pub loading: bool,
}

impl FormView {
    pub fn build(geo: &GeoCatalog, session: &PlannerSession) -> Self {
        let selection = &session.selection;
        let country = selection.country();
        let state = selection.state();
        let (start, end) = selection.date_range();

        Self {
            countries: options(geo.countries_available(), country, |r| &r.code),
            states: options(geo.states_of(country), state, |r| &r.code),
            cities: options(geo.cities_of(country, state), selection.city(), |r| &r.name),
            states_enabled: country.is_some(),
            cities_enabled: state.is_some(),
            start_date: start.map(|d| d.to_string()).unwrap_or_default(),
            end_date: end.map(|d| d.to_string()).unwrap_or_default(),
            interests: selection.interests().to_string(),
            loading: session.is_loading(),
        }
    }
}

fn options(
    regions: &[Region],
    selected: Option<&Region>,
    value: impl Fn(&Region) -> &String,
) -> Vec<OptionView> {
    regions
        .iter()
        .map(|r| OptionView {
            value: value(r).clone(),
            label: r.name.clone(),
            selected: selected.is_some_and(|s| s == r),
        })
        .collect()
}

pub struct TurnView {
    pub role: &'static str,
    pub content: String,
}

pub struct DebugView {
    pub weather: String,
    pub attractions: String,
    pub critique: String,
}

pub struct TranscriptView {
    pub turns: Vec<TurnView>,
    pub loading: bool,
    pub debug: Option<DebugView>,
}

impl TranscriptView {
    pub fn build(session: &PlannerSession) -> Self {
        Self {
            turns: session
                .log
                .turns()
                .iter()
                .map(|t| TurnView {
                    role: t.role().as_str(),
                    content: t.content().to_string(),
                })
                .collect(),
            loading: session.is_loading(),
            debug: session.debug.as_ref().map(|d| DebugView {
                weather: d.weather_or_placeholder().to_string(),
                attractions: d.attractions_or_placeholder().to_string(),
                critique: d.critique_or_placeholder().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebugTrace;

    #[test]
    fn fresh_session_only_enables_country_select() {
        let geo = GeoCatalog::bundled().unwrap();
        let view = FormView::build(&geo, &PlannerSession::new());

        assert_eq!(view.countries.len(), 2);
        assert!(view.states.is_empty());
        assert!(view.cities.is_empty());
        assert!(!view.states_enabled);
        assert!(!view.cities_enabled);
        assert!(view.countries.iter().all(|o| !o.selected));
    }

    #[test]
    fn selected_options_are_marked() {
        let geo = GeoCatalog::bundled().unwrap();
        let mut session = PlannerSession::new();
        let us = geo.country("US").unwrap();
        let texas = geo.state(&us, "TX").unwrap();
        let austin = geo.city(&us, &texas, "Austin").unwrap();
        session.selection.set_country(Some(us));
        session.selection.set_state(Some(texas));
        session.selection.set_city(Some(austin));

        let view = FormView::build(&geo, &session);

        let selected = |opts: &[OptionView]| {
            opts.iter()
                .filter(|o| o.selected)
                .map(|o| o.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(selected(&view.countries), vec!["US"]);
        assert_eq!(selected(&view.states), vec!["TX"]);
        assert_eq!(selected(&view.cities), vec!["Austin"]);
        assert!(view.cities_enabled);
    }

    #[test]
    fn transcript_hides_debug_panel_without_trace() {
        let view = TranscriptView::build(&PlannerSession::new());

        assert_eq!(view.turns.len(), 1);
        assert_eq!(view.turns[0].role, "assistant");
        assert!(view.debug.is_none());
    }

    #[test]
    fn transcript_debug_uses_placeholders() {
        let mut session = PlannerSession::new();
        session.debug = Some(DebugTrace {
            weather: Some("sunny".into()),
            ..DebugTrace::default()
        });

        let debug = TranscriptView::build(&session).debug.unwrap();

        assert_eq!(debug.weather, "sunny");
        assert_eq!(debug.attractions, "not invoked");
        assert_eq!(debug.critique, "no comments");
    }
}
