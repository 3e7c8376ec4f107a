use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{
    BestDealRequest, BestDealResponse, BestDealSource, TrackPricesRequest, TrackQuery, TrackResponse,
};
use crate::services::{deal_service, tracking_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/track", get(track_flight))
        .route("/track_prices", post(track_prices))
        .route("/best_deal", post(best_deal))
}

fn rejected(e: String) -> AppError {
    warn!("Rejected tracking request: {}", e);
    AppError::Validation(e)
}

/// GET /track
///
/// Backward simulation: points every `interval` days (default 15) leading up
/// to the flight date, starting from the latest recorded price.
pub async fn track_flight(
    Query(query): Query<TrackQuery>,
    State(state): State<AppState>,
) -> Result<Json<TrackResponse>, AppError> {
    info!("GET /track - {:?}", query);
    let request = query.validate(state.default_interval_days).map_err(rejected)?;
    let points = tracking_service::track_backward(state.store.as_ref(), &request).await?;
    Ok(Json(TrackResponse::new(request, points)))
}

/// POST /track_prices
///
/// Forward simulation from today until the flight date, starting from the
/// mean recorded price.
pub async fn track_prices(
    State(state): State<AppState>,
    Json(body): Json<TrackPricesRequest>,
) -> Result<Json<TrackResponse>, AppError> {
    info!("POST /track_prices - {:?}", body);
    let request = body.validate(state.default_interval_days).map_err(rejected)?;
    let points = tracking_service::track_forward(state.store.as_ref(), &request).await?;
    Ok(Json(TrackResponse::new(request, points)))
}

/// POST /best_deal
///
/// Cheapest point of an explicit `observations` series, or of the flight's
/// forward-tracked series when a route/airline/flight_date is given instead.
pub async fn best_deal(
    State(state): State<AppState>,
    Json(body): Json<BestDealRequest>,
) -> Result<Json<BestDealResponse>, AppError> {
    info!("POST /best_deal");
    let source = body.validate(state.default_interval_days).map_err(rejected)?;
    let deal = deal_service::find_best_deal(state.store.as_ref(), &source).await?;

    let (route, airline) = match source {
        BestDealSource::Flight(request) => (Some(request.key.route), Some(request.key.airline)),
        BestDealSource::Series(_) => (None, None),
    };

    Ok(Json(BestDealResponse {
        message: "Best deal found successfully!".to_string(),
        best_price: deal.price,
        best_date: deal.date,
        route,
        airline,
    }))
}
