//! Configuration management for the AgriWise advisory server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGW__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Log output configuration
    pub logging: LoggingConfig,

    /// Advisory engine configuration
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// JSON file with the disease catalog and crop prices; built-in tables when unset
    pub reference_path: Option<String>,

    /// Fixed seed for every request's random source (reproducible demos)
    pub seed: Option<u64>,

    /// Seed for the placeholder classifier centroids
    pub classifier_seed: u64,

    /// Largest decoded image accepted by disease detection
    pub max_image_bytes: usize,

    /// Time allowed for decoding and classifying one image
    pub decode_timeout_ms: u64,

    /// Global per-request timeout
    pub request_timeout_secs: u64,

    /// Location used when a weather request names none
    pub default_location: String,

    /// Crop used when a market request names none
    pub default_crop: String,
}

impl EngineConfig {
    pub fn decode_timeout(&self) -> Duration {
        Duration::from_millis(self.decode_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Request body ceiling: base64 inflates by 4/3, plus room for the JSON envelope
    pub fn max_body_bytes(&self) -> usize {
        self.max_image_bytes / 3 * 4 + 64 * 1024
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGW__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("logging.json", false)?
            .set_default("engine.classifier_seed", shared::DEFAULT_CLASSIFIER_SEED)?
            .set_default("engine.max_image_bytes", 10 * 1024 * 1024)?
            .set_default("engine.decode_timeout_ms", 5000)?
            .set_default("engine.request_timeout_secs", 30)?
            .set_default("engine.default_location", "Nairobi")?
            .set_default("engine.default_crop", "tomato")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGW__ prefix)
            .add_source(
                Environment::with_prefix("AGW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_path: None,
            seed: None,
            classifier_seed: shared::DEFAULT_CLASSIFIER_SEED,
            max_image_bytes: 10 * 1024 * 1024,
            decode_timeout_ms: 5000,
            request_timeout_secs: 30,
            default_location: "Nairobi".to_string(),
            default_crop: "tomato".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}
