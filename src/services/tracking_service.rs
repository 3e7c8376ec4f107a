//! Synthetic price tracking.
//!
//! Both walks are bounded multiplicative random walks seeded from the recorded
//! history. They do not forecast anything; the series only illustrate how a
//! fare might drift between now and departure.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{FlightRecord, PriceObservation, TrackRequest};
use crate::store::FlightStore;
use crate::utils::round2;

/// Starting price for the backward walk when a flight has no recorded prices.
pub const FALLBACK_PRICE: f64 = 500.0;

/// Largest relative move applied at one step.
pub const MAX_STEP_CHANGE: f64 = 0.05;

fn ensure_positive_interval(interval_days: i64) -> Result<(), AppError> {
    if interval_days <= 0 {
        return Err(AppError::Validation(format!(
            "interval_days must be a positive integer, got {}",
            interval_days
        )));
    }
    Ok(())
}

/// Applies one compounded step of at most ±5% and rounds to cents.
pub fn perturb<R: Rng>(rng: &mut R, price: f64) -> f64 {
    let change = rng.random_range(-MAX_STEP_CHANGE..=MAX_STEP_CHANGE);
    round2(price * (1.0 + change))
}

/// Walks back from the flight date: one point every `interval_days`, starting at
/// `flight_date - days_diff` and stopping before the flight date itself.
pub fn simulate_backward<R: Rng>(
    rng: &mut R,
    start_price: f64,
    flight_date: NaiveDate,
    today: NaiveDate,
    interval_days: i64,
) -> Result<Vec<PriceObservation>, AppError> {
    ensure_positive_interval(interval_days)?;

    let days_diff = (flight_date - today).num_days();
    let mut price = start_price;
    let points = (1..=days_diff)
        .rev()
        .step_by(interval_days as usize)
        .map(|offset| {
            price = perturb(rng, price);
            PriceObservation::new(flight_date - Duration::days(offset), price)
        })
        .collect();

    Ok(points)
}

/// Walks forward from `today` in `interval_days` steps while the cursor is
/// still before the flight date.
pub fn simulate_forward<R: Rng>(
    rng: &mut R,
    start_price: f64,
    flight_date: NaiveDate,
    today: NaiveDate,
    interval_days: i64,
) -> Result<Vec<PriceObservation>, AppError> {
    ensure_positive_interval(interval_days)?;

    let step = Duration::try_days(interval_days).ok_or_else(|| {
        AppError::Validation(format!("interval_days is too large, got {}", interval_days))
    })?;
    let mut price = start_price;
    let mut cursor = today;
    let mut points = Vec::new();

    while cursor < flight_date {
        price = perturb(rng, price);
        points.push(PriceObservation::new(cursor, price));
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(points)
}

async fn load_flight(store: &dyn FlightStore, request: &TrackRequest) -> Result<FlightRecord, AppError> {
    store
        .find_one(&request.key)
        .await
        .map_err(|e| {
            error!("Failed to load flight {}: {}", request.key, e);
            AppError::Store(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Flight not found: {}", request.key)))
}

/// Backward tracking from the most recent recorded price.
pub async fn track_backward(
    store: &dyn FlightStore,
    request: &TrackRequest,
) -> Result<Vec<PriceObservation>, AppError> {
    ensure_positive_interval(request.interval_days)?;
    let flight = load_flight(store, request).await?;

    let start_price = flight.latest_price().unwrap_or(FALLBACK_PRICE);
    let today = Utc::now().date_naive();
    let points = simulate_backward(&mut rand::rng(), start_price, flight.flight_date, today, request.interval_days)?;

    info!("Simulated {} backward points for {}", points.len(), request.key);
    Ok(points)
}

/// Forward tracking from the mean recorded price. Requires at least one recorded price.
pub async fn track_forward(
    store: &dyn FlightStore,
    request: &TrackRequest,
) -> Result<Vec<PriceObservation>, AppError> {
    ensure_positive_interval(request.interval_days)?;
    let flight = load_flight(store, request).await?;

    let start_price = flight.mean_price().ok_or_else(|| {
        AppError::Validation(format!("No price data found for flight {}", request.key))
    })?;
    let today = Utc::now().date_naive();
    let points = simulate_forward(&mut rand::rng(), start_price, flight.flight_date, today, request.interval_days)?;

    info!("Simulated {} forward points for {}", points.len(), request.key);
    Ok(points)
}
