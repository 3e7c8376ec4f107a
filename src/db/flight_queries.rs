use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::error;
use uuid::Uuid;

use crate::models::{FlightFilter, FlightKey, FlightRecord};

// Columns of the `flights` table that map onto a record. `id` and `created_at`
// are only used for ordering and targeting updates.
#[derive(Debug, FromRow)]
pub struct FlightRow {
    pub route: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub price_history: Json<BTreeMap<NaiveDate, f64>>,
}

impl From<FlightRow> for FlightRecord {
    fn from(row: FlightRow) -> Self {
        Self {
            route: row.route,
            airline: row.airline,
            flight_date: row.flight_date,
            price_history: row.price_history.0,
        }
    }
}

const SELECT_FLIGHTS: &str =
    "SELECT route, airline, flight_date, price_history FROM flights";

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<FlightRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FlightRow>(&format!("{} ORDER BY created_at ASC", SELECT_FLIGHTS))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(FlightRecord::from).collect())
}

pub async fn fetch_matching(
    pool: &PgPool,
    filter: &FlightFilter,
) -> Result<Vec<FlightRecord>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_FLIGHTS);
    query_builder.push(" WHERE TRUE");

    if let Some(route) = &filter.route {
        query_builder.push(" AND route = ");
        query_builder.push_bind(route.clone());
    }
    if let Some(airline) = &filter.airline {
        query_builder.push(" AND airline = ");
        query_builder.push_bind(airline.clone());
    }
    if let Some(flight_date) = filter.flight_date {
        query_builder.push(" AND flight_date = ");
        query_builder.push_bind(flight_date);
    }
    query_builder.push(" ORDER BY created_at ASC");

    let rows = query_builder
        .build_query_as::<FlightRow>()
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(FlightRecord::from).collect())
}

pub async fn fetch_one(pool: &PgPool, key: &FlightKey) -> Result<Option<FlightRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, FlightRow>(&format!(
        "{} WHERE route = $1 AND airline = $2 AND flight_date = $3 ORDER BY created_at ASC LIMIT 1",
        SELECT_FLIGHTS
    ))
    .bind(&key.route)
    .bind(&key.airline)
    .bind(key.flight_date)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(FlightRecord::from))
}

/// Sets `price_history[date] = price` on the first row matching `key`.
///
/// Returns `false` when no row matched.
pub async fn upsert_price(
    pool: &PgPool,
    key: &FlightKey,
    date: NaiveDate,
    price: f64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE flights
        SET price_history = jsonb_set(price_history, ARRAY[$4::text], to_jsonb($5::float8), true)
        WHERE id = (
            SELECT id FROM flights
            WHERE route = $1 AND airline = $2 AND flight_date = $3
            ORDER BY created_at ASC
            LIMIT 1
        )
        "#,
    )
    .bind(&key.route)
    .bind(&key.airline)
    .bind(key.flight_date)
    .bind(date.format("%Y-%m-%d").to_string())
    .bind(price)
    .execute(pool)
    .await
    .map_err(|e| {
        error!("Failed to upsert price for {} on {}: {}", key, date, e);
        e
    })?;

    Ok(result.rows_affected() > 0)
}

pub async fn insert_many(pool: &PgPool, records: &[FlightRecord]) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            "INSERT INTO flights (id, route, airline, flight_date, price_history)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(&record.route)
        .bind(&record.airline)
        .bind(record.flight_date)
        .bind(Json(&record.price_history))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await.map_err(|e| {
        error!("Failed to commit insert of {} flights: {}", records.len(), e);
        e
    })?;
    Ok(records.len())
}
