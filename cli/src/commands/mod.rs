//! CLI command implementations

pub mod config;
pub mod models;
pub mod versions;

pub use config::config_command;
pub use models::{chat_command, demo_command, embed_command};
pub use versions::versions_command;
