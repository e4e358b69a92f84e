//! Configuration types parsed from `configuration.yaml`
//!
//! Every section is optional at parse time. Keys the model loader needs are
//! checked when a model is built, so a partial file still loads.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Temperature used when a provider block does not set one
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Embedding model settings
    #[serde(default)]
    pub embedding: Option<EmbeddingConfig>,

    /// Chat model settings keyed by provider identifier (e.g. "groq")
    #[serde(default)]
    pub llm: BTreeMap<String, LlmProviderConfig>,
}

/// `embedding:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name/identifier
    #[serde(default)]
    pub model_name: Option<String>,
}

/// One entry of the `llm:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider label as written in the file
    #[serde(default)]
    pub provider: Option<String>,

    /// Model name/identifier
    #[serde(default)]
    pub model_name: Option<String>,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl AppConfig {
    /// Name of the configured embedding model
    pub fn embedding_model_name(&self) -> Result<&str> {
        self.embedding
            .as_ref()
            .and_then(|e| e.model_name.as_deref())
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: "embedding.model_name".to_string(),
                }
                .into()
            })
    }

    /// Look up the `llm.<key>` block
    pub fn llm_provider(&self, key: &str) -> Option<&LlmProviderConfig> {
        self.llm.get(key)
    }

    /// Whether nothing at all was configured
    pub fn is_empty(&self) -> bool {
        self.embedding.is_none() && self.llm.is_empty()
    }
}

impl LlmProviderConfig {
    /// Configured temperature, or [`DEFAULT_TEMPERATURE`]
    pub fn effective_temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Model name, reported against `llm.<key>.model_name` when absent
    pub fn require_model_name(&self, key: &str) -> Result<&str> {
        self.model_name.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: format!("llm.{}.model_name", key),
            }
            .into()
        })
    }
}

/// Chat model providers this crate can construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    Groq,
    Google,
    OpenAi,
}

impl LlmProvider {
    /// All supported providers
    pub const ALL: [LlmProvider; 3] = [LlmProvider::Groq, LlmProvider::Google, LlmProvider::OpenAi];

    /// Identifier used in `LLM_PROVIDER` and as the `llm.<key>` name
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
            LlmProvider::Google => "google",
            LlmProvider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn credential_key(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::Google => "GOOGLE_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Get the default base URL for this provider
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "https://api.groq.com/openai/v1",
            LlmProvider::Google => "https://generativelanguage.googleapis.com/v1beta",
            LlmProvider::OpenAi => "https://api.openai.com/v1",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "groq" => Ok(LlmProvider::Groq),
            "google" => Ok(LlmProvider::Google),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider {
                provider: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_temperature_defaults() {
        let cfg = LlmProviderConfig {
            provider: Some("openai".to_string()),
            model_name: Some("gpt-4o-mini".to_string()),
            temperature: None,
        };
        assert_eq!(cfg.effective_temperature(), 0.2);
    }

    #[test]
    fn test_missing_embedding_model_name() {
        let cfg = AppConfig {
            embedding: Some(EmbeddingConfig { model_name: None }),
            ..Default::default()
        };
        let err = cfg.embedding_model_name().unwrap_err();
        assert!(err.to_string().contains("embedding.model_name"));
    }

    #[test]
    fn test_provider_parsing() {
        for provider in LlmProvider::ALL {
            assert_eq!(provider.as_str().parse::<LlmProvider>().unwrap(), provider);
        }
        assert!(matches!(
            "anthropic".parse::<LlmProvider>(),
            Err(ConfigError::UnsupportedProvider { .. })
        ));
        // identifiers are matched exactly
        assert!("Groq".parse::<LlmProvider>().is_err());
    }
}
