use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,

    /// Model artifact configuration
    pub models: ModelsConfig,

    /// Reconciliation engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: TICKET_TRIAGE_)
            .add_source(
                config::Environment::with_prefix("TICKET_TRIAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the model artifacts
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,

    /// Vectorizer artifact file name
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,

    /// Category model artifact file name
    #[serde(default = "default_category_file")]
    pub category_file: String,

    /// Optional category confidence-calibrator artifact file name.
    /// The file being absent on disk disables calibration.
    #[serde(default = "default_calibrator_file")]
    pub category_calibrator_file: String,

    /// Priority model artifact file name
    #[serde(default = "default_priority_file")]
    pub priority_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Margin under which a Low prediction is nudged to Medium
    #[serde(default = "default_borderline_margin")]
    pub borderline_margin: f64,

    /// Use the calibrator's probability for the category confidence when available
    #[serde(default = "default_true")]
    pub calibration_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            borderline_margin: default_borderline_margin(),
            calibration_enabled: true,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "ticket_triage=info,tower_http=info".to_string()
}

fn default_service_name() -> String {
    "ticket-triage".to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_vectorizer_file() -> String {
    "vectorizer.json".to_string()
}

fn default_category_file() -> String {
    "category_model.json".to_string()
}

fn default_calibrator_file() -> String {
    "category_conf_model.json".to_string()
}

fn default_priority_file() -> String {
    "priority_model.json".to_string()
}

fn default_borderline_margin() -> f64 {
    0.10
}

fn default_true() -> bool {
    true
}
