use super::Region;
use chrono::NaiveDate;

/// The user's in-progress travel query.
///
/// Mutators never validate; completeness is checked when a plan is composed.
/// Choosing a country clears state and city, choosing a state clears city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    country: Option<Region>,
    state: Option<Region>,
    city: Option<Region>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    interests: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(&self) -> Option<&Region> {
        self.country.as_ref()
    }

    pub fn state(&self) -> Option<&Region> {
        self.state.as_ref()
    }

    pub fn city(&self) -> Option<&Region> {
        self.city.as_ref()
    }

    pub fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.start_date, self.end_date)
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    pub fn set_country(&mut self, country: Option<Region>) {
        self.country = country;
        self.state = None;
        self.city = None;
    }

    pub fn set_state(&mut self, state: Option<Region>) {
        self.state = state;
        self.city = None;
    }

    pub fn set_city(&mut self, city: Option<Region>) {
        self.city = city;
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.start_date = start;
        self.end_date = end;
    }

    pub fn set_interests(&mut self, interests: impl Into<String>) {
        self.interests = interests.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Selection {
        let mut selection = Selection::new();
        selection.set_country(Some(Region::new("US", "United States")));
        selection.set_state(Some(Region::new("TX", "Texas")));
        selection.set_city(Some(Region::new("Austin", "Austin")));
        selection.set_date_range(
            NaiveDate::from_ymd_opt(2024, 6, 1),
            NaiveDate::from_ymd_opt(2024, 6, 5),
        );
        selection.set_interests("BBQ");
        selection
    }

    #[test]
    fn new_country_clears_state_and_city() {
        let mut selection = filled();
        selection.set_country(Some(Region::new("CA", "Canada")));

        assert_eq!(selection.country().unwrap().code, "CA");
        assert!(selection.state().is_none());
        assert!(selection.city().is_none());
    }

    #[test]
    fn reselecting_same_country_still_clears_children() {
        let mut selection = filled();
        selection.set_country(Some(Region::new("US", "United States")));

        assert!(selection.state().is_none());
        assert!(selection.city().is_none());
    }

    #[test]
    fn new_state_clears_city_only() {
        let mut selection = filled();
        selection.set_state(Some(Region::new("CA", "California")));

        assert_eq!(selection.country().unwrap().code, "US");
        assert_eq!(selection.state().unwrap().name, "California");
        assert!(selection.city().is_none());
    }

    #[test]
    fn cascade_leaves_dates_and_interests_alone() {
        let mut selection = filled();
        selection.set_country(None);

        assert!(selection.country().is_none());
        assert_eq!(
            selection.date_range(),
            (
                NaiveDate::from_ymd_opt(2024, 6, 1),
                NaiveDate::from_ymd_opt(2024, 6, 5)
            )
        );
        assert_eq!(selection.interests(), "BBQ");
    }
}
