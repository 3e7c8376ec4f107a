use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Invalid STORE_BACKEND: {}. Must be 'postgres' or 'memory'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub seed_on_startup: bool,
    pub default_interval_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            store_backend: std::env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "postgres".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            seed_on_startup: std::env::var("SEED_ON_STARTUP")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            default_interval_days: std::env::var("DEFAULT_INTERVAL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    pub fn backend(&self) -> Result<StoreBackend, String> {
        self.store_backend.parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.backend()? == StoreBackend::Postgres && self.database_url.is_none() {
            return Err("STORE_BACKEND is postgres but DATABASE_URL is not set".to_string());
        }
        if self.default_interval_days <= 0 {
            return Err(format!(
                "DEFAULT_INTERVAL_DAYS must be positive, got {}",
                self.default_interval_days
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            store_backend: "memory".to_string(),
            database_url: None,
            db_max_connections: 10,
            host: "127.0.0.1".to_string(),
            port: 5000,
            seed_on_startup: false,
            default_interval_days: 15,
        }
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        assert!(config().validate().is_ok());
        assert_eq!(config().bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let cfg = AppConfig { store_backend: "Postgres".to_string(), ..config() };
        assert!(cfg.validate().is_err());

        let cfg = AppConfig { database_url: Some("postgres://localhost/flights".to_string()), ..cfg };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend() {
        let cfg = AppConfig { store_backend: "mongo".to_string(), ..config() };
        assert!(cfg.validate().unwrap_err().contains("mongo"));
    }

    #[test]
    fn test_non_positive_default_interval() {
        let cfg = AppConfig { default_interval_days: 0, ..config() };
        assert!(cfg.validate().is_err());
    }
}
