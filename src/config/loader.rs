//! Configuration File Loading
//!
//! Handles loading and saving configuration files from the usual locations,
//! in TOML or JSON, falling back to built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::Config;
use crate::error::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MATRIXTERM_CONFIG";

/// Configuration file loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Files tried in order (extension decides the format)
    search_paths: Vec<PathBuf>,
    /// File the configuration was loaded from, if any
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    /// Parse `content` in this format
    pub fn parse(self, content: &str) -> Result<Config> {
        let parsed = match self {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: self.name().to_string(),
            reason,
        })
    }

    /// Serialize `config` in this format
    pub fn serialize(self, config: &Config) -> Result<String> {
        let serialized = match self {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        serialized.map_err(|reason| Error::ConfigSerializationFailed {
            format: self.name().to_string(),
            reason,
        })
    }
}

impl ConfigLoader {
    /// Loader over the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
            current_path: None,
        }
    }

    /// Loader that only looks at `paths`
    pub fn with_search_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
            current_path: None,
        }
    }

    /// Load from the default search paths, or defaults if nothing is found
    pub fn load() -> Result<Config> {
        Self::new().load_config(None)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist and parse; search-path files that fail
    /// to parse are logged and skipped. The result is always validated.
    pub fn load_config(&mut self, path: Option<&Path>) -> Result<Config> {
        if let Some(path) = path {
            let config = Self::load_file(path)?;
            config.validate()?;
            info!("Loaded configuration from {}", path.display());
            self.current_path = Some(path.to_path_buf());
            return Ok(config);
        }

        if let Some((path, config)) = self.find_and_load_config() {
            config.validate()?;
            info!("Loaded configuration from {}", path.display());
            self.current_path = Some(path);
            return Ok(config);
        }

        debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Load and parse a single file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        ConfigFormat::from_path(path).parse(&content)
    }

    /// Save configuration to a specific path (format by extension)
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = ConfigFormat::from_path(path).serialize(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            if !path.exists() {
                continue;
            }
            match Self::load_file(path) {
                Ok(config) => return Some((path.clone(), config)),
                Err(e) => {
                    warn!("Failed to load config from {}: {}", path.display(), e);
                    continue;
                }
            }
        }
        None
    }

    /// Default search order: `$MATRIXTERM_CONFIG`, the platform config
    /// directory, then `~/.matrixterm`
    pub fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(explicit) = env::var_os(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(explicit));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("matrixterm");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.json"));
        }

        if let Some(home) = dirs::home_dir() {
            let dir = home.join(".matrixterm");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.json"));
        }

        paths
    }

    /// Where `save` writes when nothing was loaded
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matrixterm")
            .join("config.toml")
    }

    /// Save to the loaded file, or the default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::default_config_path);
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
