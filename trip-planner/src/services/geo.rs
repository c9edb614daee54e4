//! Static country / state / city lookup backing the cascading selects.
//!
//! The reference data ships inside the binary and is parsed once at startup.

use crate::models::Region;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Countries offered in the first select, in dataset order.
pub const ALLOWED_COUNTRIES: [&str; 2] = ["US", "CA"];

const BUNDLED_DATASET: &str = include_str!("../../data/geo.json");

#[derive(Debug, Error)]
pub enum GeoDataError {
    #[error("Failed to parse geographic dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("State {state} references unknown country {country}")]
    UnknownCountry { state: String, country: String },

    #[error("City {city} references unknown state {country}/{state}")]
    UnknownState {
        city: String,
        country: String,
        state: String,
    },
}

#[derive(Deserialize)]
struct Dataset {
    countries: Vec<CountryRecord>,
    states: Vec<StateRecord>,
    cities: Vec<CityRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryRecord {
    iso_code: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRecord {
    iso_code: String,
    name: String,
    country_code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityRecord {
    name: String,
    country_code: String,
    state_code: String,
}

/// Read-only geographic catalog.
#[derive(Debug)]
pub struct GeoCatalog {
    available: Vec<Region>,
    states: HashMap<String, Vec<Region>>,
    cities: HashMap<(String, String), Vec<Region>>,
}

impl GeoCatalog {
    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Result<Self, GeoDataError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_json(json: &str) -> Result<Self, GeoDataError> {
        let dataset: Dataset = serde_json::from_str(json)?;

        let known_countries: HashSet<&str> = dataset
            .countries
            .iter()
            .map(|c| c.iso_code.as_str())
            .collect();

        let available = dataset
            .countries
            .iter()
            .filter(|c| ALLOWED_COUNTRIES.contains(&c.iso_code.as_str()))
            .map(|c| Region::new(&c.iso_code, &c.name))
            .collect();

        let mut states: HashMap<String, Vec<Region>> = HashMap::new();
        for state in &dataset.states {
            if !known_countries.contains(state.country_code.as_str()) {
                return Err(GeoDataError::UnknownCountry {
                    state: state.iso_code.clone(),
                    country: state.country_code.clone(),
                });
            }
            states
                .entry(state.country_code.clone())
                .or_default()
                .push(Region::new(&state.iso_code, &state.name));
        }

        let mut cities: HashMap<(String, String), Vec<Region>> = HashMap::new();
        for city in dataset.cities {
            let known_state = states
                .get(&city.country_code)
                .is_some_and(|list| list.iter().any(|s| s.code == city.state_code));
            if !known_state {
                return Err(GeoDataError::UnknownState {
                    city: city.name,
                    country: city.country_code,
                    state: city.state_code,
                });
            }

            let entry = cities
                .entry((city.country_code.clone(), city.state_code.clone()))
                .or_default();
            // Cities are identified by name within their state.
            if entry.iter().any(|c| c.name == city.name) {
                tracing::warn!(
                    country = %city.country_code,
                    state = %city.state_code,
                    city = %city.name,
                    "Dropping duplicate city name"
                );
                continue;
            }
            entry.push(Region::new(&city.name, &city.name));
        }

        tracing::debug!(
            countries = dataset.countries.len(),
            states = dataset.states.len(),
            "Geographic dataset loaded"
        );

        Ok(Self {
            available,
            states,
            cities,
        })
    }

    /// The allow-listed countries, whatever else the dataset contains.
    pub fn countries_available(&self) -> &[Region] {
        &self.available
    }

    /// States of `country`, empty when no country is selected.
    pub fn states_of(&self, country: Option<&Region>) -> &[Region] {
        country
            .and_then(|c| self.states.get(&c.code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cities of `state` within `country`, empty unless both are selected.
    pub fn cities_of(&self, country: Option<&Region>, state: Option<&Region>) -> &[Region] {
        match (country, state) {
            (Some(country), Some(state)) => self
                .cities
                .get(&(country.code.clone(), state.code.clone()))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Resolve an allow-listed country by ISO code.
    pub fn country(&self, code: &str) -> Option<Region> {
        self.available.iter().find(|c| c.code == code).cloned()
    }

    pub fn state(&self, country: &Region, code: &str) -> Option<Region> {
        self.states_of(Some(country))
            .iter()
            .find(|s| s.code == code)
            .cloned()
    }

    pub fn city(&self, country: &Region, state: &Region, name: &str) -> Option<Region> {
        self.cities_of(Some(country), Some(state))
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }
}
