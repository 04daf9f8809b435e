//! Configuration Loader
//!
//! Loads and validates engine configuration from a TOML file.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::EngineError;
use crate::strategy::{EngineParams, EngineSeed, ZScoreEngine};

/// Log levels accepted in `[logging] level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Thresholds and windows; every field optional
    #[serde(default)]
    pub engine: EngineParams,
    /// Initial quote, score and statistics
    pub seed: EngineSeed,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid seed: {0}")]
    SeedError(#[from] EngineError),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Structural checks only. Threshold values are taken as given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.sma_window == 0 {
            return Err(ConfigError::ValidationError(
                "sma_window must be > 0".to_string(),
            ));
        }

        if self.engine.stdev_window == 0 {
            return Err(ConfigError::ValidationError(
                "stdev_window must be > 0".to_string(),
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }

    /// Seeded and configured engine
    pub fn build_engine(&self) -> Result<ZScoreEngine, ConfigError> {
        let mut engine = ZScoreEngine::from_seed(&self.seed)?;
        engine.configure(EngineParams::from(self));
        Ok(engine)
    }
}

impl From<&Config> for EngineParams {
    fn from(config: &Config) -> Self {
        config.engine.quantized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, Regime};
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[engine]
sma_window = 20
stdev_window = 25
z_threshold = "2.5"
z_close_threshold = 0.5

[seed]
bid = "1.10000"
ask = "1.10010"
deviation = "0"
mean = "1.1"
stdev = "0.01"
position = "long"
regime = "range"

[logging]
level = "info"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.engine.sma_window, 20);
        assert_eq!(config.engine.stdev_window, 25);
        assert_eq!(config.engine.z_threshold, dec!(2.5));
        assert_eq!(config.engine.z_close_threshold, dec!(0.5));
        assert_eq!(config.seed.regime, Regime::Range);
        assert_eq!(config.seed.position, Position::Long);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/engine.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_engine_and_logging_optional() {
        let file = write_config(
            r#"
[seed]
bid = "1"
ask = "1"
deviation = "0"
mean = "0"
stdev = "1"
regime = "trend"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.engine, EngineParams::default());
        assert_eq!(config.seed.position, Position::Flat);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_seed_is_parse_error() {
        let file = write_config("[engine]\nsma_window = 10\n");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_zero_window_rejected() {
        let content = create_valid_config().replace("sma_window = 20", "sma_window = 0");
        let file = write_config(&content);
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let content = create_valid_config().replace("level = \"info\"", "level = \"loud\"");
        let file = write_config(&content);
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_inverted_thresholds_accepted() {
        let content = create_valid_config().replace("z_close_threshold = 0.5", "z_close_threshold = 9");
        let file = write_config(&content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.engine.z_close_threshold, dec!(9));
    }

    #[test]
    fn test_build_engine() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let engine = config.build_engine().unwrap();

        assert_eq!(engine.mid(), dec!(1.10005));
        assert_eq!(engine.position(), Position::Flat);
        assert_eq!(engine.params().z_threshold, dec!(2.5));
        assert_eq!(engine.params().sma_window, 20);
    }

    #[test]
    fn test_config_to_engine_params() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let params = EngineParams::from(&config);
        assert_eq!(params.z_close_threshold, dec!(0.50000));
        assert_eq!(params.z_close_threshold.scale(), 5);
    }
}
