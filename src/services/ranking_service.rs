use chrono::NaiveDate;
use tracing::error;

use crate::errors::AppError;
use crate::models::{FlightProjection, FlightRecord, RankPreferences, RankedResult, SearchQuery};
use crate::services::search_service::dedup_by_key;
use crate::store::FlightStore;
use crate::utils::{parse_date, round2};

const ROUTE_WEIGHT: f64 = 0.5;
const AIRLINE_WEIGHT: f64 = 0.3;
const DATE_WEIGHT: f64 = 0.2;

/// Days of difference at which the date score halves.
const DATE_HALF_LIFE_DAYS: f64 = 30.0;

pub fn route_score(query: &str, route: &str) -> f64 {
    if query == route {
        1.0
    } else if !query.is_empty() && route.contains(query) {
        0.5
    } else {
        0.0
    }
}

pub fn airline_score(query: &str, airline: &str) -> f64 {
    if query.to_lowercase() == airline.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Smooth decay over the day distance; zero when the query date is absent or invalid.
pub fn date_score(query: Option<NaiveDate>, flight_date: NaiveDate) -> f64 {
    match query {
        Some(query) => {
            let days_diff = (flight_date - query).num_days().abs() as f64;
            1.0 / (1.0 + days_diff / DATE_HALF_LIFE_DAYS)
        }
        None => 0.0,
    }
}

pub fn score(prefs: &RankPreferences<'_>, record: &FlightRecord) -> f64 {
    let query_date = parse_date(prefs.flight_date);
    let total = ROUTE_WEIGHT * route_score(prefs.route, &record.route)
        + AIRLINE_WEIGHT * airline_score(prefs.airline, &record.airline)
        + DATE_WEIGHT * date_score(query_date, record.flight_date);
    round2(total)
}

/// Scores every record, collapses duplicates and sorts by descending score.
pub fn rank(records: &[FlightRecord], prefs: &RankPreferences<'_>) -> Vec<RankedResult> {
    let scored: Vec<RankedResult> = records
        .iter()
        .map(|record| RankedResult {
            flight: FlightProjection::from(record),
            score: score(prefs, record),
        })
        .collect();

    let mut results = dedup_by_key(scored, |r| r.flight.key());
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

pub async fn search_ranked(
    store: &dyn FlightStore,
    query: &SearchQuery,
) -> Result<Vec<RankedResult>, AppError> {
    let records = store.list_all().await.map_err(|e| {
        error!("Failed to load flights for ranking: {}", e);
        AppError::Store(e)
    })?;

    Ok(rank(&records, &query.preferences()))
}
