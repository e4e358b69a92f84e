//! Configuration module for research-analyst core
//!
//! Typed configuration sections and the YAML file loader.

pub mod loader;
pub mod types;

pub use loader::{load_config, project_root, ConfigLoader, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
pub use types::{AppConfig, EmbeddingConfig, LlmProvider, LlmProviderConfig, DEFAULT_TEMPERATURE};
