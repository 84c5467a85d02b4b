//! Configuration system
//!
//! Config files are TOML (`.toml`) or RON (`.ron`), chosen by extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::mesh::{GridSpec, MeshError};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check values that parse but are not usable
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file and validate it
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            ConfigFormat::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A configured grid fails validation
    #[error("Invalid grid #{index}: {source}")]
    Invalid {
        /// Position of the grid in the config
        index: usize,
        /// Validation failure
        source: MeshError,
    },
}

/// Grids to generate plus logging defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_filter: Option<String>,

    /// Grids to generate, in order
    pub grids: Vec<GridSpec>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            log_filter: Some("info".to_string()),
            grids: vec![GridSpec::from_rect(0.0, 0.0, 1.0, 1.0)],
        }
    }
}

impl Config for MeshConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (index, grid) in self.grids.iter().enumerate() {
            grid.validate().map_err(|source| ConfigError::Invalid { index, source })?;
        }
        Ok(())
    }
}
