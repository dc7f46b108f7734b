//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use clausewise_analyzer::AnalyzerConfig;
use clausewise_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use clausewise_llm::GeminiProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hosted model connection
    #[serde(default)]
    pub model: ModelSettings,

    /// Generation and upload settings
    #[serde(default)]
    pub analysis: AnalyzerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Hosted model connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; the `--api-key` flag and `GOOGLE_API_KEY` take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Client-side request timeout; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the configuration directory.
    pub fn dir() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".clausewise"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load the configuration at `path`, writing the defaults there first if
    /// the file does not exist yet.
    ///
    /// An existing file that cannot be read or parsed is an error and is
    /// left untouched.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        if let Err(e) = config.save_to(path) {
            warn!("Could not write default config to {}: {}", path.display(), e);
        }
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate().map_err(CliError::Config)?;
        if self.model.endpoint.trim().is_empty() {
            return Err(CliError::Config("model.endpoint must not be empty".into()));
        }
        if self.model.model.trim().is_empty() {
            return Err(CliError::Config("model.model must not be empty".into()));
        }
        if self.model.request_timeout_secs == Some(0) {
            return Err(CliError::Config(
                "model.request_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Build the model client, letting command-line values override the file.
    pub fn provider(&self, api_key: Option<String>, model: Option<String>) -> Result<GeminiProvider> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.model.api_key.clone());
        let model = model.unwrap_or_else(|| self.model.model.clone());

        let provider = GeminiProvider::new(self.model.endpoint.clone(), model, api_key);
        match self.model.request_timeout_secs {
            Some(secs) => Ok(provider.with_timeout(Duration::from_secs(secs))?),
            None => Ok(provider),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
