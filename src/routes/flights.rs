use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{
    FlightProjection, FlightRecord, RankedResult, SearchQuery, UpdatePriceRequest, UpdatePriceResponse,
};
use crate::services::import_service::{self, ImportResult};
use crate::services::{ranking_service, search_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seed", get(seed_flights).post(seed_flights))
        .route("/import", post(import_flights))
        .route("/flights", get(list_flights))
        .route("/search", get(search_flights))
        .route("/search_ranked", get(search_ranked))
        .route("/update_price", post(update_price))
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub inserted: usize,
}

pub async fn seed_flights(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    info!("/seed - Inserting sample flights");
    let inserted = import_service::seed_sample(state.store.as_ref()).await?;
    Ok(Json(SeedResponse {
        message: "Sample flights added successfully!".to_string(),
        inserted,
    }))
}

pub async fn import_flights(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResult>, AppError> {
    info!("POST /import - Importing {} bytes of CSV", body.len());
    let result = import_service::import_csv(state.store.as_ref(), &body).await?;
    if !result.errors.is_empty() {
        warn!("CSV import skipped {} rows", result.errors.len());
    }
    Ok(Json(result))
}

pub async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<FlightRecord>>, AppError> {
    info!("GET /flights - Listing all flights");
    let flights = search_service::list_flights(state.store.as_ref()).await?;
    Ok(Json(flights))
}

pub async fn search_flights(
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<FlightProjection>>, AppError> {
    info!("GET /search - {:?}", query);
    let flights = search_service::search_flights(state.store.as_ref(), &query).await?;
    Ok(Json(flights))
}

pub async fn search_ranked(
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedResult>>, AppError> {
    info!("GET /search_ranked - {:?}", query);
    let results = ranking_service::search_ranked(state.store.as_ref(), &query).await?;
    Ok(Json(results))
}

#[axum::debug_handler]
pub async fn update_price(
    State(state): State<AppState>,
    Json(request): Json<UpdatePriceRequest>,
) -> Result<Json<UpdatePriceResponse>, AppError> {
    info!("POST /update_price - {:?}", request);
    let update = request.validate().map_err(|e| {
        warn!("Rejected price update: {}", e);
        AppError::Validation(e)
    })?;

    let matched = state
        .store
        .set_price(&update.key, update.date, update.price)
        .await
        .map_err(|e| {
            error!("Failed to update price for {}: {}", update.key, e);
            AppError::Store(e)
        })?;

    if !matched {
        return Err(AppError::NotFound(format!("Flight not found: {}", update.key)));
    }

    Ok(Json(UpdatePriceResponse {
        message: "Price updated successfully!".to_string(),
        updated_date: update.date,
        new_price: update.price,
    }))
}
