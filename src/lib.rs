//! Hepascan liver disease screening core library
//!
//! This module exports the core functionality of the Hepascan application:
//! the model gateway, the per-session form and navigation state, and the
//! page rendering layer.

pub mod api;
pub mod core;
pub mod models;
pub mod ui;

/// Application configuration
pub mod config {
    use std::path::PathBuf;

    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        pub artifacts: ArtifactConfig,
        pub assets: AssetConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    /// Locations of the two serialized classifier blobs.
    #[derive(Debug, Clone, Deserialize)]
    pub struct ArtifactConfig {
        pub binary_model: PathBuf,
        pub multiclass_model: PathBuf,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AssetConfig {
        pub dir: PathBuf,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("HEPASCAN_ENV").unwrap_or_else(|_| "development".into());

        let settings = config::Config::builder()
            // Start with default settings
            .add_source(config::File::with_name("config/default"))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("HEPASCAN").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
