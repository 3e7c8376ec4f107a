use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{FlightKey, FlightRecord};
use crate::store::FlightStore;
use crate::utils::require_date;

#[derive(Debug, Deserialize)]
struct CsvRow {
    route: String,
    airline: String,
    flight_date: String,
    date: String,
    price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub rows_read: usize,
    pub flights_created: usize,
    pub errors: Vec<String>,
}

const SAMPLE_FLIGHTS: &[(&str, &str, &str, [(&str, f64); 3])] = &[
    ("LHE→JED", "PIA", "2026-01-01", [("2025-07-01", 600.0), ("2025-08-01", 650.0), ("2025-09-01", 700.0)]),
    ("LHE→BKK", "Thai Airways", "2026-02-10", [("2025-08-01", 500.0), ("2025-09-01", 530.0), ("2025-10-01", 550.0)]),
    ("ISB→DXB", "Emirates", "2026-01-15", [("2025-07-15", 700.0), ("2025-08-15", 720.0), ("2025-09-15", 760.0)]),
    ("KHI→IST", "Turkish Airlines", "2026-03-05", [("2025-09-01", 900.0), ("2025-10-01", 950.0), ("2025-11-01", 1000.0)]),
    ("LHE→DXB", "FlyDubai", "2026-02-01", [("2025-07-01", 450.0), ("2025-08-01", 460.0), ("2025-09-01", 470.0)]),
    ("ISB→DOH", "Qatar Airways", "2026-03-20", [("2025-08-01", 800.0), ("2025-09-01", 820.0), ("2025-10-01", 850.0)]),
    ("KHI→LHR", "British Airways", "2026-04-10", [("2025-09-01", 1000.0), ("2025-10-01", 1020.0), ("2025-11-01", 1050.0)]),
    ("LHE→KUL", "Malaysia Airlines", "2026-05-15", [("2025-10-01", 700.0), ("2025-11-01", 710.0), ("2025-12-01", 730.0)]),
    ("ISB→JED", "Saudia", "2026-06-01", [("2025-09-01", 620.0), ("2025-10-01", 640.0), ("2025-11-01", 660.0)]),
    ("KHI→BKK", "Thai Airways", "2026-02-25", [("2025-07-01", 480.0), ("2025-08-01", 500.0), ("2025-09-01", 520.0)]),
];

fn sample_date(value: &str) -> NaiveDate {
    // Literals above are all well-formed.
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

/// The built-in ten-flight demo dataset.
pub fn sample_flights() -> Vec<FlightRecord> {
    SAMPLE_FLIGHTS
        .iter()
        .map(|(route, airline, flight_date, prices)| {
            prices.iter().fold(
                FlightRecord::new(*route, *airline, sample_date(flight_date)),
                |record, (date, price)| record.with_price(sample_date(date), *price),
            )
        })
        .collect()
}

pub async fn seed_sample(store: &dyn FlightStore) -> Result<usize, AppError> {
    let inserted = store.insert_many(sample_flights()).await.map_err(|e| {
        error!("Failed to seed sample flights: {}", e);
        AppError::Store(e)
    })?;
    info!("Seeded {} sample flights", inserted);
    Ok(inserted)
}

fn parse_row(row: CsvRow) -> Result<(FlightKey, NaiveDate, f64)> {
    if row.route.is_empty() || row.airline.is_empty() {
        anyhow::bail!("route and airline must not be empty");
    }
    if !row.price.is_finite() || row.price < 0.0 {
        anyhow::bail!("price must be a nonnegative number, got {}", row.price);
    }
    let flight_date = require_date("flight_date", &row.flight_date).map_err(anyhow::Error::msg)?;
    let date = require_date("date", &row.date).map_err(anyhow::Error::msg)?;
    Ok((FlightKey::new(row.route, row.airline, flight_date), date, row.price))
}

/// Parses `route,airline,flight_date,date,price` rows, one observation per row,
/// grouping observations of the same flight into one record.
///
/// Bad lines are reported in the result and skipped.
pub fn parse_csv(content: &str) -> (Vec<FlightRecord>, ImportResult) {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut result = ImportResult::default();
    let mut order: Vec<FlightKey> = Vec::new();
    let mut records: HashMap<FlightKey, FlightRecord> = HashMap::new();

    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        result.rows_read += 1;

        let parsed = row
            .context("malformed row")
            .and_then(parse_row)
            .with_context(|| format!("line {}", line));

        match parsed {
            Ok((key, date, price)) => {
                let record = records.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    FlightRecord::new(key.route.clone(), key.airline.clone(), key.flight_date)
                });
                record.price_history.insert(date, price);
            }
            Err(e) => {
                warn!("Skipping CSV row: {:#}", e);
                result.errors.push(format!("{:#}", e));
            }
        }
    }

    let flights = order.iter().filter_map(|key| records.remove(key)).collect();
    (flights, result)
}

pub async fn import_csv(store: &dyn FlightStore, content: &str) -> Result<ImportResult, AppError> {
    let (flights, mut result) = parse_csv(content);

    result.flights_created = store.insert_many(flights).await.map_err(|e| {
        error!("Failed to store imported flights: {}", e);
        AppError::Store(e)
    })?;

    info!(
        "Imported {} rows into {} flights ({} errors)",
        result.rows_read,
        result.flights_created,
        result.errors.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFlightStore;

    #[test]
    fn test_sample_flights() {
        let flights = sample_flights();
        assert_eq!(flights.len(), 10);
        assert!(flights.iter().all(|f| f.price_history.len() == 3));
        assert_eq!(flights[0].flight_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(flights[0].latest_price(), Some(700.0));
    }

    #[test]
    fn test_parse_csv_groups_rows_by_flight() {
        let csv = "route,airline,flight_date,date,price\n\
                   LHE→JED,PIA,2026-01-01,2025-07-01,600\n\
                   LHE→BKK,Thai Airways,2026-02-10,2025-08-01,500\n\
                   LHE→JED,PIA,2026-01-01,2025-08-01,650.5\n";

        let (flights, result) = parse_csv(csv);
        assert_eq!(result.rows_read, 3);
        assert!(result.errors.is_empty());
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].route, "LHE→JED");
        assert_eq!(flights[0].price_history.len(), 2);
        assert_eq!(flights[1].airline, "Thai Airways");
    }

    #[test]
    fn test_parse_csv_reports_bad_lines() {
        let csv = "route,airline,flight_date,date,price\n\
                   LHE→JED,PIA,2026-01-01,2025-07-01,600\n\
                   LHE→JED,PIA,01-01-2026,2025-07-01,600\n\
                   LHE→JED,PIA,2026-01-01,2025-07-01,cheap\n\
                   LHE→JED,PIA,2026-01-01,2025-07-01,-5\n";

        let (flights, result) = parse_csv(csv);
        assert_eq!(flights.len(), 1);
        assert_eq!(result.rows_read, 4);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].starts_with("line 3"));
        assert!(result.errors[0].contains("flight_date"));
    }

    #[tokio::test]
    async fn test_import_csv_inserts_records() {
        let store = MemoryFlightStore::new();
        let csv = "route,airline,flight_date,date,price\nISB→DXB,Emirates,2026-01-15,2025-07-15,700\n";

        let result = import_csv(&store, csv).await.unwrap();
        assert_eq!(result.flights_created, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_sample() {
        let store = MemoryFlightStore::new();
        assert_eq!(seed_sample(&store).await.unwrap(), 10);
        assert_eq!(seed_sample(&store).await.unwrap(), 10);
        assert_eq!(store.len(), 20);
    }
}
