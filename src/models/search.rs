use serde::Deserialize;

use crate::models::FlightFilter;
use crate::utils::{non_empty, parse_date};

/// Query string shared by `GET /search` and `GET /search_ranked`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<String>,
}

impl SearchQuery {
    pub fn new(route: &str, airline: &str, flight_date: &str) -> Self {
        Self {
            route: Some(route.to_string()),
            airline: Some(airline.to_string()),
            flight_date: Some(flight_date.to_string()),
        }
    }

    /// Exact-match filter for this query, or `None` when the supplied
    /// flight date can never equal a stored date.
    pub fn to_filter(&self) -> Option<FlightFilter> {
        let flight_date = match non_empty(&self.flight_date) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };
        Some(FlightFilter {
            route: non_empty(&self.route).map(str::to_string),
            airline: non_empty(&self.airline).map(str::to_string),
            flight_date,
        })
    }

    /// Trimmed preferences for ranking; a missing field becomes the empty string.
    pub fn preferences(&self) -> RankPreferences<'_> {
        RankPreferences {
            route: self.route.as_deref().unwrap_or("").trim(),
            airline: self.airline.as_deref().unwrap_or("").trim(),
            flight_date: self.flight_date.as_deref().unwrap_or("").trim(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPreferences<'a> {
    pub route: &'a str,
    pub airline: &'a str,
    pub flight_date: &'a str,
}
