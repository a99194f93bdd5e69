// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compositor::StyleConfig;

pub mod logging;
pub mod server;
pub mod style;

pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use style::{AnchorConfig, BoxConfig, StyleSection};

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub style: StyleSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut substituted = String::with_capacity(yaml.len());
        let mut last = 0;
        for caps in re.captures_iter(yaml) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = std::env::var(name.as_str())
                .map_err(|_| ConfigError::MissingEnvVar(name.as_str().to_string()))?;
            substituted.push_str(&yaml[last..whole.start()]);
            substituted.push_str(&value);
            last = whole.end();
        }
        substituted.push_str(&yaml[last..]);

        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.address.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "server.address cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port cannot be 0".to_string()));
        }

        if self.server.threads == 0 {
            return Err(ConfigError::Invalid(
                "server.threads must be at least 1".to_string(),
            ));
        }

        if self.server.max_body_size == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_size must be greater than 0".to_string(),
            ));
        }

        if self.server.max_text_chars == Some(0) {
            return Err(ConfigError::Invalid(
                "server.max_text_chars must be greater than 0".to_string(),
            ));
        }

        self.style.validate()
    }

    /// Build the runtime style shared by every request.
    pub fn style_config(&self) -> Result<StyleConfig, ConfigError> {
        self.style.to_style_config()
    }
}
