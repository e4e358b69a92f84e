//! Configuration file resolution and loading
//!
//! The file location is resolved with single-source priority:
//! 1. Explicit path passed to the loader (highest priority)
//! 2. `PATH_TO_CONFIG` environment variable
//! 3. `<project-root>/config/configuration.yaml`
//!
//! A relative explicit or `PATH_TO_CONFIG` path is resolved against the
//! working directory. The default location is anchored at the project root.

use super::AppConfig;
use crate::error::{ConfigError, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "PATH_TO_CONFIG";

/// Default configuration location, relative to the project root
pub const DEFAULT_CONFIG_FILE: &str = "config/configuration.yaml";

/// Root of the workspace this crate was built from
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

/// Load configuration from `path`, or from the resolved default location
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_path(path.to_path_buf());
    }
    loader.load()
}

/// YAML configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit config file path
    path: Option<PathBuf>,
    /// Value of `PATH_TO_CONFIG`, if any
    env_path: Option<String>,
    /// Anchor for the default location
    root: PathBuf,
    /// Anchor for relative explicit and env paths
    working_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a loader that reads `PATH_TO_CONFIG` from the process environment
    pub fn new() -> Self {
        Self {
            path: None,
            env_path: std::env::var(CONFIG_PATH_ENV).ok(),
            root: project_root(),
            working_dir: std::env::current_dir().unwrap_or_default(),
        }
    }

    /// Set the explicit config file path
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Replace the `PATH_TO_CONFIG` value seen by this loader
    pub fn with_env_path(mut self, env_path: Option<String>) -> Self {
        self.env_path = env_path;
        self
    }

    /// Set the project root anchor
    pub fn with_project_root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }

    /// Set the directory relative paths are resolved against
    pub fn with_working_dir(mut self, working_dir: PathBuf) -> Self {
        self.working_dir = working_dir;
        self
    }

    /// Determine the effective configuration file location
    pub fn resolve_path(&self) -> PathBuf {
        let candidate = match (&self.path, &self.env_path) {
            (Some(path), _) => path.clone(),
            (None, Some(env_path)) if !env_path.is_empty() => PathBuf::from(env_path),
            _ => return self.root.join(DEFAULT_CONFIG_FILE),
        };

        if candidate.is_absolute() {
            candidate
        } else {
            self.working_dir.join(candidate)
        }
    }

    /// Resolve, read and parse the configuration file
    pub fn load(&self) -> Result<AppConfig> {
        let path = self.resolve_path();
        debug!("Resolved configuration path: {}", path.display());

        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let parse_error = |e: config::ConfigError| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let config: AppConfig = Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Yaml))
            .build()
            .map_err(parse_error)?
            .try_deserialize()
            .map_err(parse_error)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
