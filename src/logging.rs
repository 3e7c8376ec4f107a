use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            loki_enabled: std::env::var("LOKI_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            loki_url: std::env::var("LOKI_URL").ok(),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "flight-tracker".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err("LOKI_ENABLED is true but LOKI_URL is not set".to_string());
        }
        Ok(())
    }
}

/// Installs the global subscriber: env-filtered console output, plus a Loki
/// layer when `LOKI_ENABLED` is set and the `loki` feature is compiled in.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    let registry = registry.with(loki_layer(&config)?);

    registry.init();

    match (&config.loki_url, config.loki_enabled && cfg!(feature = "loki")) {
        (Some(url), true) => tracing::info!(
            "Logging to console and Loki at {} as {} ({})",
            url,
            config.service_name,
            config.environment
        ),
        _ => tracing::info!("Console logging initialized"),
    }
    Ok(())
}

/// Builds the Loki layer and spawns its shipping task. Must run inside the tokio runtime.
#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>, Box<dyn std::error::Error>> {
    let Some(loki_url) = config.loki_url.as_deref().filter(|_| config.loki_enabled) else {
        return Ok(None);
    };

    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .label("environment", &config.environment)?
        .build_url(url::Url::parse(loki_url)?)?;
    tokio::spawn(task);

    Ok(Some(layer))
}
