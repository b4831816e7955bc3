//! Configuration parser for loading and layering settings.
//!
//! Settings are layered: built-in defaults, then the YAML config file, then
//! `TFMV_*` environment variables. Command-line flags are applied last by
//! the binary.

use crate::error::{ConfigError, Result, TfmvError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::{MatchStrategy, MoveConfig, ReusePolicy};

/// Environment variable overriding the plan file.
pub const ENV_PLAN_FILE: &str = "TFMV_PLAN_FILE";
/// Environment variable overriding the matching strategy.
pub const ENV_STRATEGY: &str = "TFMV_STRATEGY";
/// Environment variable overriding the reuse policy.
pub const ENV_REUSE: &str = "TFMV_REUSE";

/// Configuration parser for loading move-inference settings.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving `.env`.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving `.env`.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<MoveConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(TfmvError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TfmvError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or names an unknown setting.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<MoveConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(MoveConfig::default());
        }

        let config: MoveConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            TfmvError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!(
            "Parsed configuration: plan_file={}, strategy={}, reuse={}",
            config.plan_file.display(),
            config.strategy,
            config.reuse
        );
        Ok(config)
    }

    /// Applies `TFMV_*` environment variable overrides to the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value outside its allowed set.
    pub fn apply_env_overrides(&self, config: &mut MoveConfig) -> Result<()> {
        Self::apply_overrides_from(config, |name| std::env::var(name).ok())
    }

    fn apply_overrides_from(
        config: &mut MoveConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(plan_file) = lookup(ENV_PLAN_FILE) {
            debug!("Overriding plan_file from environment");
            config.plan_file = PathBuf::from(plan_file);
        }

        if let Some(strategy) = lookup(ENV_STRATEGY) {
            debug!("Overriding strategy from environment");
            config.strategy = strategy.parse::<MatchStrategy>()?;
        }

        if let Some(reuse) = lookup(ENV_REUSE) {
            debug!("Overriding reuse from environment");
            config.reuse = reuse.parse::<ReusePolicy>()?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                TfmvError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".tfmv.yaml", ".tfmv.yml", "tfmv.yaml", "tfmv.yml"];

/// Finds a configuration file in the given directory or its parents.
///
/// Returns `None` when no configuration file exists; a config file is
/// optional.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.is_file() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
