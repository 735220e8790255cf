//! Configuration management for the Chunkwise CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Built-in defaults
//! - Config file (~/.chunkwise/config.yaml or --config)
//! - Environment variables (CHUNKWISE_*)
//! - Command-line flags
//!
//! Later sources win. All generated artifacts (caches, exported reports)
//! live under the save directory, which defaults to `~/.chunkwise`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Default model identifier used for both completion requests and the
/// tokenizer adapter.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default language the prompts ask the model to reply in.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Default number of attempts before a completion call is declared dead.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 3;

/// Main application configuration.
///
/// Every recognized field is enumerated here; there is no pass-through of
/// unknown keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Model identifier (drives both the completion request and tokenizer)
    pub model: String,

    /// Language the prompts ask the model to reply in
    pub language: String,

    /// Directory for caches and exported reports
    pub save_dir: PathBuf,

    /// Write reports to the save directory without being asked
    pub auto_export: bool,

    /// Completion provider name (e.g., "openai")
    pub provider: String,

    /// Custom provider endpoint URL
    pub endpoint: Option<String>,

    /// Environment variable holding the provider API key
    pub api_key_env: String,

    /// Retry attempt ceiling for completion calls
    pub max_attempts: usize,

    /// Fixed delay between retry attempts, in seconds
    pub retry_delay_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    model: Option<String>,
    language: Option<String>,
    #[serde(rename = "saveDir")]
    save_dir: Option<String>,
    #[serde(rename = "autoExport")]
    auto_export: Option<bool>,
    provider: Option<ProviderSection>,
    retry: Option<RetrySection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderSection {
    name: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrySection {
    #[serde(rename = "maxAttempts")]
    max_attempts: Option<usize>,
    #[serde(rename = "delaySecs")]
    delay_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

/// Resolve the save directory root.
///
/// `$CHUNKWISE_HOME` wins; otherwise `$HOME/.chunkwise`, with
/// `%USERPROFILE%` as the Windows fallback. Missing all three is a fatal
/// configuration error.
pub fn save_path() -> AppResult<PathBuf> {
    if let Ok(home) = std::env::var("CHUNKWISE_HOME") {
        return Ok(PathBuf::from(home));
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| {
            AppError::Config(
                "Cannot resolve the user home directory: set HOME or USERPROFILE".to_string(),
            )
        })?;

    Ok(PathBuf::from(home).join(".chunkwise"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            save_dir: save_path().unwrap_or_else(|_| PathBuf::from(".chunkwise")),
            auto_export: true,
            provider: "openai".to_string(),
            endpoint: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `CHUNKWISE_HOME`: Override the save directory
    /// - `CHUNKWISE_CONFIG`: Path to config file
    /// - `CHUNKWISE_MODEL`: Model identifier
    /// - `CHUNKWISE_LANGUAGE`: Reply language
    /// - `CHUNKWISE_PROVIDER`: Completion provider
    /// - `CHUNKWISE_ENDPOINT`: Provider endpoint URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `config_file` instead of the default
    /// config file location.
    ///
    /// An explicit path (the `--config` flag) wins over `CHUNKWISE_CONFIG`,
    /// which in turn wins over `<save_dir>/config.yaml`.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();
        config.save_dir = save_path()?;

        config.config_file = config_file;
        if config.config_file.is_none() {
            if let Ok(env_file) = std::env::var("CHUNKWISE_CONFIG") {
                config.config_file = Some(PathBuf::from(env_file));
            }
        }

        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.save_dir.join("config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(model) = std::env::var("CHUNKWISE_MODEL") {
            config.model = model;
        }

        if let Ok(language) = std::env::var("CHUNKWISE_LANGUAGE") {
            config.language = language;
        }

        if let Ok(provider) = std::env::var("CHUNKWISE_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(endpoint) = std::env::var("CHUNKWISE_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(model) = config_file.model {
            result.model = model;
        }

        if let Some(language) = config_file.language {
            result.language = language;
        }

        if let Some(save_dir) = config_file.save_dir {
            result.save_dir = PathBuf::from(save_dir);
        }

        if let Some(auto_export) = config_file.auto_export {
            result.auto_export = auto_export;
        }

        if let Some(provider) = config_file.provider {
            if let Some(name) = provider.name {
                result.provider = name;
            }
            if let Some(endpoint) = provider.endpoint {
                result.endpoint = Some(endpoint);
            }
            if let Some(api_key_env) = provider.api_key_env {
                result.api_key_env = api_key_env;
            }
        }

        if let Some(retry) = config_file.retry {
            if let Some(max_attempts) = retry.max_attempts {
                result.max_attempts = max_attempts;
            }
            if let Some(delay_secs) = retry.delay_secs {
                result.retry_delay_secs = delay_secs;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        language: Option<String>,
        provider: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }

        if let Some(language) = language {
            self.language = language;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Fixed delay between retry attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Resolve the provider API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }

    /// Ensure the save directory exists.
    pub fn ensure_save_dir(&self) -> AppResult<()> {
        if !self.save_dir.exists() {
            std::fs::create_dir_all(&self.save_dir).map_err(|e| {
                AppError::Config(format!("Failed to create save directory: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.language, "English");
        assert_eq!(config.provider, "openai");
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.retry_delay(), Duration::from_secs(3));
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("gpt-4".to_string()),
            Some("Chinese".to_string()),
            None,
            None,
            true,
            false,
        );

        assert_eq!(overridden.model, "gpt-4");
        assert_eq!(overridden.language, "Chinese");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_load_from_honors_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "model: gpt-4o\nlanguage: French\n").unwrap();

        let config = AppConfig::load_from(Some(path.clone())).unwrap();

        assert_eq!(config.config_file, Some(path));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.language, "French");
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
model: gpt-4
language: Chinese
autoExport: false
provider:
  name: openai
  endpoint: http://localhost:8080/v1
retry:
  maxAttempts: 5
  delaySecs: 1
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.model, "gpt-4");
        assert_eq!(merged.language, "Chinese");
        assert!(!merged.auto_export);
        assert_eq!(merged.endpoint.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(merged.max_attempts, 5);
        assert_eq!(merged.retry_delay_secs, 1);
    }

    #[test]
    fn test_merge_yaml_partial_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "language: Japanese\n").unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.language, "Japanese");
        assert_eq!(merged.model, DEFAULT_MODEL);
        assert_eq!(merged.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
