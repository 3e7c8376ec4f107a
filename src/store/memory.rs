use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::models::{FlightFilter, FlightKey, FlightRecord};
use crate::store::{FlightStore, StoreError};

/// In-process store keeping records in insertion order.
///
/// The lock is only held inside synchronous sections, never across an await.
#[derive(Clone, Default)]
pub struct MemoryFlightStore {
    records: Arc<RwLock<Vec<FlightRecord>>>,
}

impl MemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<FlightRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[async_trait]
impl FlightStore for MemoryFlightStore {
    async fn list_all(&self) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn find(&self, filter: &FlightFilter) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| filter.accepts(r))
            .cloned()
            .collect())
    }

    async fn find_one(&self, key: &FlightKey) -> Result<Option<FlightRecord>, StoreError> {
        Ok(self.records.read().iter().find(|r| r.matches(key)).cloned())
    }

    async fn set_price(&self, key: &FlightKey, date: NaiveDate, price: f64) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.matches(key)) {
            Some(record) => {
                record.price_history.insert(date, price);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_many(&self, records: Vec<FlightRecord>) -> Result<usize, StoreError> {
        let count = records.len();
        self.records.write().extend(records);
        Ok(count)
    }
}
