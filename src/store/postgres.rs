use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::flight_queries;
use crate::models::{FlightFilter, FlightKey, FlightRecord};
use crate::store::{FlightStore, StoreError};

pub struct PgFlightStore {
    pool: PgPool,
}

impl PgFlightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl FlightStore for PgFlightStore {
    async fn list_all(&self) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(flight_queries::fetch_all(&self.pool).await?)
    }

    async fn find(&self, filter: &FlightFilter) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(flight_queries::fetch_matching(&self.pool, filter).await?)
    }

    async fn find_one(&self, key: &FlightKey) -> Result<Option<FlightRecord>, StoreError> {
        Ok(flight_queries::fetch_one(&self.pool, key).await?)
    }

    async fn set_price(&self, key: &FlightKey, date: NaiveDate, price: f64) -> Result<bool, StoreError> {
        Ok(flight_queries::upsert_price(&self.pool, key, date, price).await?)
    }

    async fn insert_many(&self, records: Vec<FlightRecord>) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        Ok(flight_queries::insert_many(&self.pool, &records).await?)
    }
}
