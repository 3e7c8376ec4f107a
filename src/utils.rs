use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Trimmed value of an optional text field, treating blank as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Collects the names of missing fields and formats them as one validation message.
#[derive(Debug, Default)]
pub struct MissingFields(Vec<&'static str>);

impl MissingFields {
    pub fn text<'a>(&mut self, name: &'static str, value: &'a Option<String>) -> &'a str {
        match non_empty(value) {
            Some(v) => v,
            None => {
                self.0.push(name);
                ""
            }
        }
    }

    pub fn value<T: Copy + Default>(&mut self, name: &'static str, value: Option<T>) -> T {
        match value {
            Some(v) => v,
            None => {
                self.0.push(name);
                T::default()
            }
        }
    }

    pub fn check(self) -> Result<(), String> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(format!("Missing required fields: {}", self.0.join(", ")))
        }
    }
}

pub fn require_date(name: &str, value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("{} must be a date in YYYY-MM-DD format, got '{}'", name, value))
}
