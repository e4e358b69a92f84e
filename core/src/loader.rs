//! Model loader
//!
//! Builds the embedding client and the chat client from configuration and
//! validated credentials. Both load paths log any failure and return it
//! wrapped as [`Error::EmbeddingLoad`] or [`Error::LlmLoad`].

use crate::config::{AppConfig, ConfigLoader, LlmProvider};
use crate::credentials::ApiKeyManager;
use crate::error::{ConfigError, CredentialError, Error, Result};
use crate::llm::{GoogleEmbeddings, LlmModel};
use crate::runtime::ExecutionContext;
use tracing::{debug, error, info};

/// Environment variable selecting the active `llm.<key>` block
pub const LLM_PROVIDER_ENV: &str = "LLM_PROVIDER";

/// Provider key used when `LLM_PROVIDER` is unset
pub const DEFAULT_LLM_PROVIDER: &str = "google";

/// Builds configured model clients
#[derive(Debug, Clone)]
pub struct ModelLoader {
    api_keys: ApiKeyManager,
    config: AppConfig,
    provider_key: String,
}

impl ModelLoader {
    /// Create a loader from already-validated dependencies
    pub fn new(api_keys: ApiKeyManager, config: AppConfig) -> Self {
        Self {
            api_keys,
            config,
            provider_key: DEFAULT_LLM_PROVIDER.to_string(),
        }
    }

    /// Select the `llm.<key>` block used by [`ModelLoader::load_llm_model`]
    pub fn with_provider_key(mut self, provider_key: impl Into<String>) -> Self {
        self.provider_key = provider_key.into();
        self
    }

    /// Create a loader from the process environment and default config location
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(ConfigLoader::new())
    }

    /// Create a loader from the process environment with an explicit config loader
    ///
    /// Credentials are validated before the configuration file is read.
    pub fn from_env_with(config_loader: ConfigLoader) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(Error::Generic(format!("Failed to load .env: {}", e))),
        }

        let api_keys = ApiKeyManager::from_env()?;
        let config = config_loader.load()?;
        let provider_key = std::env::var(LLM_PROVIDER_ENV)
            .unwrap_or_else(|_| DEFAULT_LLM_PROVIDER.to_string());

        Ok(Self::new(api_keys, config).with_provider_key(provider_key))
    }

    /// Validated credentials
    pub fn api_keys(&self) -> &ApiKeyManager {
        &self.api_keys
    }

    /// Parsed configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Active provider key
    pub fn provider_key(&self) -> &str {
        &self.provider_key
    }

    /// Build the embedding client, creating a runtime if none is active
    pub fn load_embedding_model(&self) -> Result<GoogleEmbeddings> {
        ExecutionContext::ensure()
            .and_then(|context| self.build_embedding_model(context))
            .map_err(|e| {
                error!("Error loading embedding model: {}", e.detail());
                Error::EmbeddingLoad(e.detail())
            })
    }

    /// Build the embedding client on an injected execution context
    pub fn load_embedding_model_in(&self, context: ExecutionContext) -> Result<GoogleEmbeddings> {
        self.build_embedding_model(context).map_err(|e| {
            error!("Error loading embedding model: {}", e.detail());
            Error::EmbeddingLoad(e.detail())
        })
    }

    /// Build the chat client for the active provider key
    pub fn load_llm_model(&self) -> Result<LlmModel> {
        self.build_llm_model().map_err(|e| {
            error!("Error loading LLM model: {}", e.detail());
            Error::LlmLoad(e.detail())
        })
    }

    fn build_embedding_model(&self, context: ExecutionContext) -> Result<GoogleEmbeddings> {
        let model_name = self.config.embedding_model_name()?;
        info!("Loading Google Generative AI Embedding Model");

        let api_key = self.credential(LlmProvider::Google.credential_key())?;
        let embeddings = GoogleEmbeddings::new(api_key, model_name, context)?;

        info!("Successfully loaded embedding model: {}", model_name);
        Ok(embeddings)
    }

    fn build_llm_model(&self) -> Result<LlmModel> {
        let provider_key = self.provider_key.as_str();
        let llm_config = self.config.llm_provider(provider_key).ok_or_else(|| {
            ConfigError::ProviderNotConfigured {
                provider: provider_key.to_string(),
            }
        })?;

        let model_name = llm_config.require_model_name(provider_key)?;
        let temperature = llm_config.effective_temperature();
        info!(
            "Loading LLM Model from provider: {} ({})",
            provider_key,
            llm_config.provider.as_deref().unwrap_or(provider_key)
        );

        let provider: LlmProvider = provider_key.parse()?;
        let api_key = self.credential(provider.credential_key())?;
        let model = LlmModel::build(provider, api_key, model_name, temperature)?;

        info!(
            "Successfully loaded LLM model: {} from provider: {}",
            model_name, provider_key
        );
        Ok(model)
    }

    fn credential(&self, key: &str) -> Result<&str> {
        self.api_keys.get(key).ok_or_else(|| {
            CredentialError::Missing {
                key: key.to_string(),
            }
            .into()
        })
    }
}
