//! TOML configuration for the harness

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::error::ConfigError;
use crate::registry::DEFAULT_MODULE;
use crate::report::ROOT_ID;
use crate::runner::{ELAPSED_TIME_PRECISION, MAX_ELAPSED_PRECISION};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "jsunit.toml";

/// Output format of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// One JSON document
    Json,
    /// HTML fragment
    Html,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Html => f.write_str("html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(ConfigError::Invalid(format!("unknown format '{}'", other))),
        }
    }
}

/// Harness configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Module label used until the first `module` call
    pub default_module: String,

    /// Decimals kept in elapsed times
    pub elapsed_precision: u32,

    /// Id of the HTML root container
    pub root_id: String,

    /// Report format
    pub format: OutputFormat,

    /// Coloured terminal output
    pub color: bool,

    /// Show details of passing assertions too
    pub verbose: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_module: DEFAULT_MODULE.to_string(),
            elapsed_precision: ELAPSED_TIME_PRECISION,
            root_id: ROOT_ID.to_string(),
            format: OutputFormat::default(),
            color: true,
            verbose: false,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Syntax(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Try the given path, then the default location, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        let path = match path {
            Some(path) => path,
            None if default_path.exists() => default_path,
            None => return Self::default(),
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Reject values the harness cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_module.is_empty() {
            return Err(ConfigError::Invalid(
                "default_module must not be empty".to_string(),
            ));
        }
        if self.elapsed_precision > MAX_ELAPSED_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "elapsed_precision must be at most {}, got {}",
                MAX_ELAPSED_PRECISION, self.elapsed_precision
            )));
        }
        Ok(())
    }
}
