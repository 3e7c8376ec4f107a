use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{FlightKey, PriceObservation};
use crate::utils::{require_date, MissingFields};

// ==============================================================================
// Tracking Requests
// ==============================================================================

/// Query string of `GET /track`.
#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<String>,
    pub interval: Option<i64>,
}

/// JSON body of `POST /track_prices`.
#[derive(Debug, Default, Deserialize)]
pub struct TrackPricesRequest {
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<String>,
    pub interval_days: Option<i64>,
}

/// A validated tracking request. `interval_days` is checked for positivity by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRequest {
    pub key: FlightKey,
    pub interval_days: i64,
}

impl TrackRequest {
    pub fn parse(
        route: &Option<String>,
        airline: &Option<String>,
        flight_date: &Option<String>,
        interval_days: Option<i64>,
        default_interval: i64,
    ) -> Result<Self, String> {
        let mut missing = MissingFields::default();
        let route = missing.text("route", route);
        let airline = missing.text("airline", airline);
        let flight_date = missing.text("flight_date", flight_date);
        missing.check()?;

        Ok(Self {
            key: FlightKey::new(route, airline, require_date("flight_date", flight_date)?),
            interval_days: interval_days.unwrap_or(default_interval),
        })
    }
}

impl TrackQuery {
    pub fn validate(&self, default_interval: i64) -> Result<TrackRequest, String> {
        TrackRequest::parse(&self.route, &self.airline, &self.flight_date, self.interval, default_interval)
    }
}

impl TrackPricesRequest {
    pub fn validate(&self, default_interval: i64) -> Result<TrackRequest, String> {
        TrackRequest::parse(&self.route, &self.airline, &self.flight_date, self.interval_days, default_interval)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResponse {
    pub route: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub interval_days: i64,
    pub tracked_prices: Vec<PriceObservation>,
}

impl TrackResponse {
    pub fn new(request: TrackRequest, tracked_prices: Vec<PriceObservation>) -> Self {
        Self {
            route: request.key.route,
            airline: request.key.airline,
            flight_date: request.key.flight_date,
            interval_days: request.interval_days,
            tracked_prices,
        }
    }
}

// ==============================================================================
// Best Deal
// ==============================================================================

/// JSON body of `POST /best_deal`: either an explicit series or a flight to track.
#[derive(Debug, Default, Deserialize)]
pub struct BestDealRequest {
    pub observations: Option<Vec<PriceObservation>>,
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<String>,
    pub interval_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BestDealSource {
    Series(Vec<PriceObservation>),
    Flight(TrackRequest),
}

impl BestDealRequest {
    pub fn validate(self, default_interval: i64) -> Result<BestDealSource, String> {
        if let Some(observations) = self.observations {
            if let Some(bad) = observations.iter().find(|o| !o.price.is_finite() || o.price < 0.0) {
                return Err(format!("price on {} must be a nonnegative number, got {}", bad.date, bad.price));
            }
            return Ok(BestDealSource::Series(observations));
        }
        TrackRequest::parse(&self.route, &self.airline, &self.flight_date, self.interval_days, default_interval)
            .map(BestDealSource::Flight)
            .map_err(|e| format!("{} (or supply 'observations')", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestDealResponse {
    pub message: String,
    pub best_price: f64,
    pub best_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
}
