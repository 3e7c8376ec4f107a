use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// A logical flight and the prices observed for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub route: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    #[serde(default)]
    pub price_history: BTreeMap<NaiveDate, f64>,
}

impl FlightRecord {
    pub fn new(route: impl Into<String>, airline: impl Into<String>, flight_date: NaiveDate) -> Self {
        Self {
            route: route.into(),
            airline: airline.into(),
            flight_date,
            price_history: BTreeMap::new(),
        }
    }

    pub fn with_price(mut self, date: NaiveDate, price: f64) -> Self {
        self.price_history.insert(date, price);
        self
    }

    pub fn key(&self) -> FlightKey {
        FlightKey {
            route: self.route.clone(),
            airline: self.airline.clone(),
            flight_date: self.flight_date,
        }
    }

    pub fn matches(&self, key: &FlightKey) -> bool {
        self.route == key.route && self.airline == key.airline && self.flight_date == key.flight_date
    }

    /// Flattens `price_history` into observations.
    pub fn observations(&self) -> Vec<PriceObservation> {
        self.price_history
            .iter()
            .map(|(date, price)| PriceObservation { date: *date, price: *price })
            .collect()
    }

    /// Price recorded at the latest observation date.
    pub fn latest_price(&self) -> Option<f64> {
        self.price_history.iter().next_back().map(|(_, price)| *price)
    }

    /// Arithmetic mean of every recorded price.
    pub fn mean_price(&self) -> Option<f64> {
        if self.price_history.is_empty() {
            return None;
        }
        let total: f64 = self.price_history.values().sum();
        Some(total / self.price_history.len() as f64)
    }
}

/// Natural key of a flight: (route, airline, flight_date).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    pub route: String,
    pub airline: String,
    pub flight_date: NaiveDate,
}

impl FlightKey {
    pub fn new(route: impl Into<String>, airline: impl Into<String>, flight_date: NaiveDate) -> Self {
        Self {
            route: route.into(),
            airline: airline.into(),
            flight_date,
        }
    }
}

impl std::fmt::Display for FlightKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.route, self.airline, self.flight_date)
    }
}

/// Exact-match filter over stored flights. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<NaiveDate>,
}

impl FlightFilter {
    pub fn accepts(&self, record: &FlightRecord) -> bool {
        self.route.as_deref().map_or(true, |r| r == record.route)
            && self.airline.as_deref().map_or(true, |a| a == record.airline)
            && self.flight_date.map_or(true, |d| d == record.flight_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

// External view of a flight returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightProjection {
    pub route: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub price_time_series: Vec<PriceObservation>,
}

impl FlightProjection {
    pub fn key(&self) -> FlightKey {
        FlightKey::new(self.route.clone(), self.airline.clone(), self.flight_date)
    }
}

impl From<&FlightRecord> for FlightProjection {
    fn from(record: &FlightRecord) -> Self {
        Self {
            route: record.route.clone(),
            airline: record.airline.clone(),
            flight_date: record.flight_date,
            price_time_series: record.observations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub flight: FlightProjection,
    pub score: f64,
}
