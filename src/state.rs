use std::sync::Arc;

use crate::store::FlightStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FlightStore>,
    pub default_interval_days: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn FlightStore>, default_interval_days: i64) -> Self {
        Self { store, default_interval_days }
    }
}
