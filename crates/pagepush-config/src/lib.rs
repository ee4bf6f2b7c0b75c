//! Configuration management for pagepush.
//!
//! Parses `pagepush.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.token` (defaults to `${CONFLUENCE_TOKEN}`)
//! - `confluence.space_key`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override target space key.
    pub space_key: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagepush.toml";

/// Environment variable holding the bearer token unless `token` is set.
pub const TOKEN_ENV_VAR: &str = "CONFLUENCE_TOKEN";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    #[serde(default)]
    pub base_url: String,
    /// Personal access token sent as a bearer token.
    #[serde(default = "default_token")]
    pub token: String,
    /// Default space key for created pages.
    #[serde(default)]
    pub space_key: Option<String>,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: default_token(),
            space_key: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.token, "confluence.token")?;
        if let Some(space_key) = &self.space_key {
            require_non_empty(space_key, "confluence.space_key")?;
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation(
                "confluence.timeout must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_token() -> String {
    format!("${{{TOKEN_ENV_VAR}}}")
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagepush.toml` in current directory and parents.
    ///
    /// CLI settings are applied before environment expansion, so an overridden
    /// value may itself reference `${VAR}`.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// a referenced environment variable is unset.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.expand_env_vars()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Creates the `[confluence]` section when a CLI value targets it and the
    /// file had none.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.base_url.is_none() && settings.space_key.is_none() {
            return;
        }
        let confluence = self.confluence.get_or_insert_with(ConfluenceConfig::default);
        if let Some(base_url) = &settings.base_url {
            confluence.base_url.clone_from(base_url);
        }
        if let Some(space_key) = &settings.space_key {
            confluence.space_key = Some(space_key.clone());
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[confluence] section required in config (or pass --base-url)".into(),
            )
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.token = expand::expand_env(&confluence.token, "confluence.token")?;
            if let Some(ref space_key) = confluence.space_key {
                confluence.space_key =
                    Some(expand::expand_env(space_key, "confluence.space_key")?);
            }
        }
        Ok(())
    }
}
