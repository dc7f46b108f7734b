//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};

/// Generation and upload settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Sampling temperature for the document analysis call
    pub analysis_temperature: f64,

    /// Output token budget for the document analysis call
    pub analysis_max_output_tokens: u32,

    /// Sampling temperature for clause questions
    pub chat_temperature: f64,

    /// Output token budget for clause questions
    pub chat_max_output_tokens: u32,

    /// Largest accepted upload (bytes)
    pub max_upload_bytes: usize,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("analysis_temperature", self.analysis_temperature),
            ("chat_temperature", self.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 2.0", name));
            }
        }
        if self.analysis_max_output_tokens == 0 {
            return Err("analysis_max_output_tokens must be greater than 0".to_string());
        }
        if self.chat_max_output_tokens == 0 {
            return Err("chat_max_output_tokens must be greater than 0".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            analysis_temperature: 0.2,
            analysis_max_output_tokens: 2048,
            chat_temperature: 0.3,
            chat_max_output_tokens: 512,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis_max_output_tokens, 2048);
        assert_eq!(config.chat_max_output_tokens, 512);
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = AnalyzerConfig::default();
        config.chat_max_output_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.analysis_temperature = 3.5;
        assert!(config.validate().unwrap_err().contains("analysis_temperature"));

        let mut config = AnalyzerConfig::default();
        config.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig {
            chat_max_output_tokens: 256,
            ..AnalyzerConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        assert_eq!(AnalyzerConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_temperatures_serialize_exactly() {
        let toml_str = AnalyzerConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("analysis_temperature = 0.2\n"));
        assert!(toml_str.contains("chat_temperature = 0.3\n"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml("chat_temperature = 0.5\n").unwrap();
        assert_eq!(config.chat_temperature, 0.5);
        assert_eq!(config.analysis_max_output_tokens, 2048);
    }

    #[test]
    fn test_bad_toml() {
        let err = AnalyzerConfig::from_toml("max_upload_bytes = \"lots\"").unwrap_err();
        assert!(err.starts_with("Failed to parse TOML"));
    }
}
