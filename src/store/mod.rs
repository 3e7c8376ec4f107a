mod memory;
mod postgres;

pub use memory::MemoryFlightStore;
pub use postgres::PgFlightStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{FlightFilter, FlightKey, FlightRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Collection of flight records.
///
/// Duplicate documents for one natural key are allowed; readers collapse them.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Every stored record, in storage order.
    async fn list_all(&self) -> Result<Vec<FlightRecord>, StoreError>;

    /// Records matching every field set on `filter`.
    async fn find(&self, filter: &FlightFilter) -> Result<Vec<FlightRecord>, StoreError>;

    /// First record with the given natural key.
    async fn find_one(&self, key: &FlightKey) -> Result<Option<FlightRecord>, StoreError>;

    /// Sets `price_history[date] = price` on the first record matching `key`,
    /// creating the date entry if absent. Returns `false` if nothing matched.
    async fn set_price(&self, key: &FlightKey, date: NaiveDate, price: f64) -> Result<bool, StoreError>;

    async fn insert_many(&self, records: Vec<FlightRecord>) -> Result<usize, StoreError>;
}
