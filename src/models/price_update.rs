use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::FlightKey;
use crate::utils::{require_date, MissingFields};

/// JSON body of `POST /update_price`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePriceRequest {
    pub route: Option<String>,
    pub airline: Option<String>,
    pub flight_date: Option<String>,
    pub date: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub key: FlightKey,
    pub date: NaiveDate,
    pub price: f64,
}

impl UpdatePriceRequest {
    pub fn validate(&self) -> Result<PriceUpdate, String> {
        let mut missing = MissingFields::default();
        let route = missing.text("route", &self.route);
        let airline = missing.text("airline", &self.airline);
        let flight_date = missing.text("flight_date", &self.flight_date);
        let date = missing.text("date", &self.date);
        let price = missing.value("price", self.price);
        missing.check()?;

        if !price.is_finite() || price < 0.0 {
            return Err(format!("price must be a nonnegative number, got {}", price));
        }

        Ok(PriceUpdate {
            key: FlightKey::new(route, airline, require_date("flight_date", flight_date)?),
            date: require_date("date", date)?,
            price,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePriceResponse {
    pub message: String,
    pub updated_date: NaiveDate,
    pub new_price: f64,
}
