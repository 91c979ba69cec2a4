use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{AnalyzerError, Result};
use std::fs;

/// Default character budget for aggregated source text
pub const DEFAULT_MAX_SOURCE_CHARS: usize = 15000;

/// Main configuration struct for the application
///
/// This structure holds all configuration settings including the model
/// backend endpoint, the server bind address, and processing limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Maximum number of characters of source text sent to the model
    pub max_source_chars: usize,
    /// Optional bound on external command execution (clone/build/test).
    /// `None` disables the bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
    /// Settings for the text-generation backend
    pub model: ModelConfig,
}

/// Settings for the text-generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Ollama-compatible API
    pub base_url: String,
    /// Model name to request completions from
    pub model_name: String,
    /// Optional request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads configuration from the default config file location
    ///
    /// If the config file doesn't exist, returns the default configuration.
    /// The config file is expected to be in TOML format. Environment
    /// variables override values from the file.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .map_err(|e| AnalyzerError::Config(format!("Failed to read config file: {}", e)))?;
                toml::from_str(&content)
                    .map_err(|e| AnalyzerError::Config(format!("Failed to parse config file: {}", e)))?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("repo-analyzer").join("config.toml"))
    }

    /// Applies environment-variable overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("ANALYZER_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.model.base_url = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            self.model.model_name = model;
        }
        if let Ok(chars) = std::env::var("ANALYZER_MAX_SOURCE_CHARS") {
            if let Ok(parsed) = chars.parse() {
                self.max_source_chars = parsed;
            }
        }
        if let Ok(secs) = std::env::var("ANALYZER_COMMAND_TIMEOUT_SECS") {
            self.command_timeout_secs = secs.parse().ok();
        }
    }

    /// Validates the configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.model.base_url.trim().is_empty() {
            return Err(AnalyzerError::Config("Model base URL is empty".into()));
        }
        if self.model.model_name.trim().is_empty() {
            return Err(AnalyzerError::Config("Model name is empty".into()));
        }
        url::Url::parse(&self.model.base_url)
            .map_err(|e| AnalyzerError::Config(format!("Invalid model base URL: {}", e)))?;
        Ok(())
    }

    /// Command timeout as a `Duration`, if configured
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            max_source_chars: DEFAULT_MAX_SOURCE_CHARS,
            command_timeout_secs: None,
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model_name: "codellama:7b".to_string(),
            timeout_secs: None,
        }
    }
}
