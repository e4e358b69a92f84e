//! Show the resolved configuration

use analyst_core::ConfigLoader;
use anyhow::{Context, Result};

/// Print the resolved configuration path and the parsed configuration
pub fn config_command(loader: ConfigLoader) -> Result<()> {
    let path = loader.resolve_path();
    let config = loader
        .load()
        .with_context(|| format!("Failed to load config from: {}", path.display()))?;

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
