//! # analyst CLI
//!
//! Command-line interface for the research analyst model layer.
//!
//! ## Usage
//!
//! - `analyst` / `analyst demo` - Load both models and run a sample embedding and chat
//! - `analyst embed "text"` - Print the embedding of a text
//! - `analyst chat "prompt"` - Send a prompt to the configured chat model
//! - `analyst config` - Show the resolved configuration
//! - `analyst versions` - Show dependency versions

use analyst_core::{ConfigLoader, ModelLoader};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{chat_command, config_command, demo_command, embed_command, versions_command};

/// analyst - research assistant model loader
#[derive(Parser)]
#[command(name = "analyst")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Load and exercise the research analyst's configured models")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (overrides PATH_TO_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// LLM provider key to use (overrides LLM_PROVIDER)
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a sample text and ask a sample question
    Demo,

    /// Print the embedding of a text
    Embed {
        /// Text to embed
        text: String,
    },

    /// Send a prompt to the chat model
    Chat {
        /// Prompt to send
        prompt: String,
    },

    /// Show the resolved configuration file and its contents
    Config,

    /// Show versions of the packages this build depends on
    Versions,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_path(config_path.clone());
    }

    loader
}

/// Build the model loader, validating credentials first
fn build_model_loader(cli: &Cli) -> Result<ModelLoader> {
    let mut loader = ModelLoader::from_env_with(build_config_loader(cli))?;

    if let Some(provider) = &cli.provider {
        loader = loader.with_provider_key(provider.clone());
    }

    Ok(loader)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    analyst_core::init_tracing_with_debug(cli.verbose);

    match &cli.command {
        None | Some(Commands::Demo) => demo_command(build_model_loader(&cli)?).await,
        Some(Commands::Embed { text }) => embed_command(build_model_loader(&cli)?, text).await,
        Some(Commands::Chat { prompt }) => chat_command(build_model_loader(&cli)?, prompt).await,
        Some(Commands::Config) => config_command(build_config_loader(&cli)),
        Some(Commands::Versions) => {
            versions_command();
            Ok(())
        }
    }
}
