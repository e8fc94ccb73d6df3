//! Application Configuration
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML
//! file, then `WEATHER__<SECTION>__<KEY>` environment variables.

use alerting::AlertConfig;
use llm_client::LlmConfig;
use predictor::PredictionMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use weather_model::Region;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "WEATHER_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/weather.toml";
const ENV_PREFIX: &str = "WEATHER";
const ENV_SEPARATOR: &str = "__";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    pub mode: PredictionMode,
    /// Hours of synthetic history fed to each prediction
    pub history_hours: u32,
    /// Fixed seed for the synthetic generators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            mode: PredictionMode::RemoteAnalysis,
            history_hours: 240,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root for prediction results, reports and alert summaries
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub alerts: AlertConfig,
    pub llm: LlmConfig,
    pub prediction: PredictionConfig,
    pub output: OutputConfig,
    pub regions: Vec<Region>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            alerts: AlertConfig::default(),
            llm: LlmConfig::default(),
            prediction: PredictionConfig::default(),
            output: OutputConfig::default(),
            regions: Region::defaults(),
        }
    }
}

impl AppConfig {
    /// Load from the path in `WEATHER_CONFIG`, or the default path
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    /// Load with `path` as the file layer; a missing file is skipped
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        info!("Configuration loaded (file layer: {})", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::Invalid("no regions configured".to_string()));
        }
        if self.prediction.history_hours == 0 {
            return Err(ConfigError::Invalid(
                "prediction.history_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Look up a configured region by key
    pub fn region(&self, key: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.prediction.history_hours, 240);
        assert!(config.alerts.enable_console);
        assert!(!config.alerts.enable_email);
        assert!(config.llm.api_key.is_none());
        assert!(config.region("xuanzhou").is_some());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.regions.len(), 2);
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[prediction]
mode = "local_only"
history_hours = 48

[alerts]
enable_console = false
"#
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.prediction.mode, PredictionMode::LocalOnly);
        assert_eq!(config.prediction.history_hours, 48);
        assert!(!config.alerts.enable_console);
        assert!(config.alerts.enable_file);
    }

    #[test]
    fn test_zero_history_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.toml");
        std::fs::write(&path, "[prediction]\nhistory_hours = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
