use config::{Config, ConfigError, File};
use extractors::ParserConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct CliConfig {
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[parser]
# Merge the built-in OTP, promotion and delivery-notice phrases with your own rules
include_default_suppression_rules = true
# Negative classifier verdicts at or above this confidence reject the message
classifier_rejection_threshold = 0.8

[logging]
# Overridden by RUST_LOG
level = "info"
"#;

impl CliConfig {
    /// Load from `path`, or the platform config dir. A missing file at the
    /// default location is created with commented defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = get_config_path();
                write_default_if_missing(&default_path)?;
                default_path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: CliConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

fn write_default_if_missing(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("txnsift").join("txnsift.toml")
    } else {
        PathBuf::from("txnsift.toml")
    }
}
