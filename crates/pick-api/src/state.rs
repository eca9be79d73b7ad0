//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the immutable price catalog and the service configuration.

use anyhow::Context;
use pick_core::{PriceCatalog, PricingError, PricingResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Locations searched for a price catalog when `PRICE_CATALOG` is unset
const CATALOG_PATHS: [&str; 3] = [
    "config/prices.toml",
    "../config/prices.toml",
    "../../config/prices.toml",
];

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit price catalog file
    pub catalog_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            catalog_path: lookup("PRICE_CATALOG")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> PricingResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                PricingError::Configuration(format!(
                    "invalid bind address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Price catalog, read-only after start-up
    pub catalog: Arc<PriceCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from config, loading the price catalog
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = load_price_catalog(&config)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create state around an already built catalog
    pub fn with_catalog(config: AppConfig, catalog: PriceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config,
        }
    }
}

/// Load the price catalog from `PRICE_CATALOG`, the default paths, or the built-in list
pub fn load_price_catalog(config: &AppConfig) -> anyhow::Result<PriceCatalog> {
    if let Some(path) = &config.catalog_path {
        return read_catalog(path);
    }

    for path in CATALOG_PATHS {
        let path = Path::new(path);
        if path.is_file() {
            return read_catalog(path);
        }
    }

    tracing::warn!("No price catalog found, using built-in prices");
    Ok(PriceCatalog::fresh_pick())
}

fn read_catalog(path: &Path) -> anyhow::Result<PriceCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let catalog = PriceCatalog::from_toml(&content)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    if catalog.is_empty() {
        tracing::warn!("{} lists no prices; every product bills at 0.00", path.display());
    } else {
        tracing::info!("Loaded {} prices from {}", catalog.len(), path.display());
    }
    Ok(catalog)
}
