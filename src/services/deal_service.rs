use tracing::info;

use crate::errors::AppError;
use crate::models::{BestDealSource, PriceObservation};
use crate::services::tracking_service;
use crate::store::FlightStore;

/// Lowest-priced observation; the earliest one wins a tie.
pub fn best_deal(observations: &[PriceObservation]) -> Result<PriceObservation, AppError> {
    observations
        .iter()
        .copied()
        .min_by(|a, b| a.price.total_cmp(&b.price))
        .ok_or_else(|| AppError::Validation("Cannot pick a best deal from an empty price series".to_string()))
}

/// Resolves the series to search, tracking the flight forward when no explicit series was given.
pub async fn find_best_deal(
    store: &dyn FlightStore,
    source: &BestDealSource,
) -> Result<PriceObservation, AppError> {
    match source {
        BestDealSource::Series(observations) => best_deal(observations),
        BestDealSource::Flight(request) => {
            let series = tracking_service::track_forward(store, request).await?;
            let deal = best_deal(&series)?;
            info!("Best deal for {}: {} on {}", request.key, deal.price, deal.date);
            Ok(deal)
        }
    }
}
