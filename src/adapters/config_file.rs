//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] on top of a JSON file.  Fields missing from
//! the file take their defaults; a missing file means "all defaults".
//! Whatever is loaded is validated before it is returned.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate a JSON document.
    pub fn parse(text: &str) -> Result<SystemConfig, ConfigError> {
        let config: SystemConfig = serde_json::from_str(text).map_err(|e| {
            warn!("Config parse error: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let config = Self::parse(&text)?;
                info!("Config loaded from {}", self.path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", self.path.display());
                Ok(SystemConfig::default())
            }
            Err(e) => {
                warn!("Config read failed ({}): {}", self.path.display(), e);
                Err(ConfigError::IoError)
            }
        }
    }
}
