//! # Research Analyst Core
//!
//! Configuration and model initialization layer for the research analyst.
//!
//! This library reads the YAML model configuration, validates the required
//! API credentials and builds ready-to-use embedding and chat clients for the
//! supported providers (Groq, Google Gemini, OpenAI).

// Core modules
pub mod config;
pub mod credentials;
pub mod error;
pub mod llm;
pub mod loader;
pub mod runtime;

// Re-export commonly used types
pub use config::{load_config, AppConfig, ConfigLoader, LlmProvider};
pub use credentials::{ApiKeyManager, REQUIRED_API_KEYS};
pub use error::{Error, Result};
pub use llm::{EmbeddingClient, GoogleEmbeddings, LlmClient, LlmModel};
pub use loader::ModelLoader;
pub use runtime::ExecutionContext;

/// Current version of the analyst-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with a specific debug mode
///
/// `RUST_LOG` takes precedence when set. Output goes to stderr so command
/// output on stdout stays clean.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
