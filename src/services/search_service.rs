use std::collections::HashSet;

use tracing::{debug, error};

use crate::errors::AppError;
use crate::models::{FlightKey, FlightProjection, FlightRecord, SearchQuery};
use crate::store::FlightStore;

/// Keeps the first item seen for each natural key, preserving order.
pub fn dedup_by_key<T>(items: Vec<T>, key: impl Fn(&T) -> FlightKey) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

pub fn project(records: &[FlightRecord]) -> Vec<FlightProjection> {
    let projections: Vec<FlightProjection> = records.iter().map(FlightProjection::from).collect();
    dedup_by_key(projections, |p| p.key())
}

pub async fn list_flights(store: &dyn FlightStore) -> Result<Vec<FlightRecord>, AppError> {
    store.list_all().await.map_err(|e| {
        error!("Failed to list flights: {}", e);
        AppError::Store(e)
    })
}

pub async fn search_flights(
    store: &dyn FlightStore,
    query: &SearchQuery,
) -> Result<Vec<FlightProjection>, AppError> {
    let Some(filter) = query.to_filter() else {
        debug!("Search flight_date {:?} is not a valid date, nothing can match", query.flight_date);
        return Ok(Vec::new());
    };

    let records = store.find(&filter).await.map_err(|e| {
        error!("Failed to search flights with {:?}: {}", filter, e);
        AppError::Store(e)
    })?;

    Ok(project(&records))
}
