//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON config file,
//! then environment variables, then command-line overrides applied by the
//! CLI commands. The parse pipeline itself takes no configuration.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_EXPIRY_WINDOW_YEARS, DEFAULT_INPUT_EXTENSION,
    MAX_EXPIRY_WINDOW_YEARS, MAX_WORKERS, WORKERS_ENV_VAR,
};
use crate::error::{MrzError, Result};
use crate::reader::FrameConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Global configuration for MRZ reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MrzConfig {
    /// Number of concurrent workers for batch processing
    pub workers: usize,

    /// File extension (without the dot) picked up when scanning directories
    pub input_extension: String,

    /// Look-ahead window in years when resolving expiry date centuries
    pub expiry_window_years: i32,

    /// Guard characters around serial reader transmissions
    pub frame: FrameConfig,
}

impl Default for MrzConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            expiry_window_years: DEFAULT_EXPIRY_WINDOW_YEARS,
            frame: FrameConfig::default(),
        }
    }
}

/// One worker per logical CPU, capped at [`MAX_WORKERS`]
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

impl MrzConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with a custom input extension
    pub fn with_input_extension(mut self, extension: impl Into<String>) -> Self {
        self.input_extension = extension.into();
        self
    }

    /// Create configuration with a custom expiry look-ahead window
    pub fn with_expiry_window_years(mut self, years: i32) -> Self {
        self.expiry_window_years = years;
        self
    }

    /// Create configuration with a custom reader frame
    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }

    /// Check the configuration for values the batch processor cannot use
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(MrzError::configuration(
                "Number of workers must be greater than 0",
            ));
        }
        if self.workers > MAX_WORKERS {
            return Err(MrzError::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }
        if self.input_extension.is_empty() || self.input_extension.contains(['.', '/', '\\']) {
            return Err(MrzError::configuration(format!(
                "Input extension must be a bare extension such as '{}', got '{}'",
                DEFAULT_INPUT_EXTENSION, self.input_extension
            )));
        }
        if !(0..=MAX_EXPIRY_WINDOW_YEARS).contains(&self.expiry_window_years) {
            return Err(MrzError::configuration(format!(
                "Expiry window must be between 0 and {} years, got {}",
                MAX_EXPIRY_WINDOW_YEARS, self.expiry_window_years
            )));
        }
        Ok(())
    }

    /// Default config file location (`<config dir>/mrz-reader/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| MrzError::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MrzError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            MrzError::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            MrzError::serialization(format!("Invalid config file {}", path.display()), e)
        })?;
        debug!("Loaded config file: {}", path.display());
        Ok(config)
    }

    /// Apply a worker count given as text, as read from the environment
    pub fn apply_workers_override(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        let workers = value.trim().parse::<usize>().map_err(|_| {
            MrzError::configuration(format!(
                "{} must be a positive integer, got '{}'",
                WORKERS_ENV_VAR, value
            ))
        })?;
        debug!("Worker count overridden by {}: {}", WORKERS_ENV_VAR, workers);
        self.workers = workers;
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        let workers = std::env::var(WORKERS_ENV_VAR).ok();
        self.apply_workers_override(workers.as_deref())
    }

    /// Load with layered configuration (defaults -> file -> env)
    ///
    /// An explicitly named file must exist; otherwise the default location
    /// is used only when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                info!("Using config file: {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    info!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    debug!("No config file found, using defaults and environment variables");
                    Self::default()
                }
            },
        };

        config.apply_env()?;
        Ok(config)
    }
}
