//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use quill_core::QuillError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `QUILL_` prefix (`QUILL_DATABASE__URL`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, QuillError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config_dir = config_dir.into();
        let environment =
            std::env::var("QUILL_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, QuillError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), QuillError> {
        let environment = self.config.read().await.app.environment.clone();
        let new_config = Self::load_config(&self.config_dir, &environment)?;
        *self.config.write().await = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    pub fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, QuillError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_quill_error)?;
        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_quill_error)?;
        environment.clone_into(&mut app_config.app.environment);

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), QuillError> {
        if config.app.environment == "production" && config.security.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        if config.database.url.is_empty() {
            return Err(QuillError::Configuration("Database URL is required".to_string()));
        }

        if config.cache.listing_ttl_secs == 0 {
            return Err(QuillError::Configuration(
                "cache.listing_ttl_secs must be greater than zero".to_string(),
            ));
        }

        if config.security.jwt_secret.is_empty() {
            return Err(QuillError::Configuration("JWT secret is required".to_string()));
        }

        Ok(())
    }
}

fn config_error_to_quill_error(err: ConfigError) -> QuillError {
    QuillError::Configuration(err.to_string())
}
