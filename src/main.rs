mod app;
mod config;
mod db;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;
mod utils;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};
use crate::logging::{init_logging, LoggingConfig};
use crate::services::import_service;
use crate::state::AppState;
use crate::store::{FlightStore, MemoryFlightStore, PgFlightStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env();
    config.validate()?;

    let store: Arc<dyn FlightStore> = match config.backend()? {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL is not set")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;
            let store = PgFlightStore::new(pool);
            store.migrate().await?;
            tracing::info!("Using Postgres flight store");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory flight store; data is lost on exit");
            Arc::new(MemoryFlightStore::new())
        }
    };

    if config.seed_on_startup {
        import_service::seed_sample(store.as_ref()).await?;
    }

    let state = AppState::new(store, config.default_interval_days);
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Flight tracker running at http://{}/", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
