use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{flights, health, tracking};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(health::router())
        .merge(flights::router())
        .merge(tracking::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::models::FlightRecord;
    use crate::services::import_service::sample_flights;
    use crate::store::{FlightStore, MemoryFlightStore};

    fn app_with(records: Vec<FlightRecord>) -> (Router, MemoryFlightStore) {
        let store = MemoryFlightStore::with_records(records);
        let state = AppState::new(Arc::new(store.clone()), 15);
        (create_app(state), store)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_and_health() {
        let (app, _) = app_with(vec![]);
        let (status, body) = send(app.clone(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Flight Price Tracker API is running!");

        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_seed_then_list() {
        let (app, store) = app_with(vec![]);
        let (status, body) = send(app.clone(), post_json("/seed", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inserted"], 10);
        assert_eq!(store.len(), 10);

        let (_, body) = send(app, get("/flights")).await;
        assert_eq!(body.as_array().unwrap().len(), 10);
        assert_eq!(body[0]["price_history"]["2025-07-01"], 600.0);
    }

    #[tokio::test]
    async fn test_search_dedups_repeated_seed() {
        let mut records = sample_flights();
        records.extend(sample_flights());
        let (app, _) = app_with(records);

        let (status, body) = send(app, get("/search?airline=Thai%20Airways")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["price_time_series"][0]["date"], "2025-08-01");
    }

    #[tokio::test]
    async fn test_search_ranked_exact_match_first() {
        let (app, _) = app_with(sample_flights());
        let uri = "/search_ranked?route=LHE%E2%86%92JED&airline=PIA&flight_date=2026-01-01";

        let (status, body) = send(app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["route"], "LHE→JED");
        assert_eq!(body[0]["score"], 1.0);
        assert_eq!(body.as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_track_requires_fields() {
        let (app, _) = app_with(sample_flights());
        let (status, body) = send(app, get("/track?route=LHE%E2%86%92JED")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("airline"));
    }

    #[tokio::test]
    async fn test_track_unknown_flight() {
        let (app, _) = app_with(sample_flights());
        let (status, _) = send(app, get("/track?route=LHE%E2%86%92JED&airline=PIA&flight_date=2030-01-01")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_track_backward_and_forward() {
        let flight_date = Utc::now().date_naive() + Duration::days(45);
        let record = FlightRecord::new("LHE→DXB", "FlyDubai", flight_date)
            .with_price(Utc::now().date_naive(), 450.0);
        let (app, _) = app_with(vec![record]);

        let uri = format!("/track?route=LHE%E2%86%92DXB&airline=FlyDubai&flight_date={}&interval=15", flight_date);
        let (status, body) = send(app.clone(), get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interval_days"], 15);
        assert_eq!(body["tracked_prices"].as_array().unwrap().len(), 3);

        let request = json!({
            "route": "LHE→DXB",
            "airline": "FlyDubai",
            "flight_date": flight_date.to_string(),
        });
        let (status, body) = send(app, post_json("/track_prices", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tracked_prices"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_track_prices_rejects_zero_interval() {
        let (app, _) = app_with(sample_flights());
        let request = json!({
            "route": "LHE→JED",
            "airline": "PIA",
            "flight_date": "2026-01-01",
            "interval_days": 0,
        });
        let (status, _) = send(app, post_json("/track_prices", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_interval_is_a_bad_request() {
        let (app, _) = app_with(sample_flights());
        let request = json!({
            "route": "LHE→JED",
            "airline": "PIA",
            "flight_date": "2026-01-01",
            "interval_days": 1_000_000_000_000_000_i64,
        });
        let (status, body) = send(app.clone(), post_json("/track_prices", request.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("interval_days"));

        let (status, _) = send(app, post_json("/best_deal", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_price_add_overwrite_and_errors() {
        let (app, store) = app_with(sample_flights());
        let mut request = json!({
            "route": "LHE→JED",
            "airline": "PIA",
            "flight_date": "2026-01-01",
            "date": "2025-10-01",
            "price": 720.0,
        });

        let (status, body) = send(app.clone(), post_json("/update_price", request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated_date"], "2025-10-01");
        assert_eq!(body["new_price"], 720.0);

        request["price"] = json!(735.5);
        send(app.clone(), post_json("/update_price", request.clone())).await;
        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].price_history.len(), 4);
        assert_eq!(records[0].latest_price(), Some(735.5));

        request["airline"] = json!("Saudia");
        let (status, _) = send(app.clone(), post_json("/update_price", request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app, post_json("/update_price", json!({ "route": "LHE→JED" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Missing required fields"));
    }

    #[tokio::test]
    async fn test_best_deal_from_series() {
        let (app, _) = app_with(vec![]);
        let request = json!({
            "observations": [
                { "date": "2025-10-23", "price": 575.28 },
                { "date": "2025-11-07", "price": 554.77 },
                { "date": "2026-02-05", "price": 551.00 },
            ]
        });

        let (status, body) = send(app.clone(), post_json("/best_deal", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["best_price"], 551.0);
        assert_eq!(body["best_date"], "2026-02-05");

        let (status, _) = send(app.clone(), post_json("/best_deal", json!({ "observations": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = json!({
            "observations": [
                { "date": "2025-10-23", "price": 575.28 },
                { "date": "2025-11-07", "price": -5.0 },
            ]
        });
        let (status, body) = send(app, post_json("/best_deal", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("2025-11-07"));
    }

    #[tokio::test]
    async fn test_import_csv() {
        let (app, store) = app_with(vec![]);
        let csv = "route,airline,flight_date,date,price\nKHI→IST,Turkish Airlines,2026-03-05,2025-09-01,900\n";
        let request = Request::builder()
            .method(Method::POST)
            .uri("/import")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(csv))
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flights_created"], 1);
        assert_eq!(store.len(), 1);
    }
}
