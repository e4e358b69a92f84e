//! Required API credentials
//!
//! All keys are read once at construction. The first missing key aborts
//! construction; nothing is read lazily afterwards.

use crate::error::{CredentialError, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::{error, info};

/// Environment variables that must be set before any model is built
pub const REQUIRED_API_KEYS: [&str; 7] = [
    "GROQ_API_KEY",
    "GOOGLE_API_KEY",
    "TAVILY_API_KEY",
    "OPENAI_API_KEY",
    "LANGSMITH_API_KEY",
    "LANGSMITH_TRACING_V2",
    "LANGSMITH_PROJECT",
];

/// Table of validated API keys
#[derive(Clone)]
pub struct ApiKeyManager {
    keys: HashMap<String, String>,
}

impl ApiKeyManager {
    /// Read the required keys from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the required keys through `lookup`
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut keys = HashMap::with_capacity(REQUIRED_API_KEYS.len());

        for name in REQUIRED_API_KEYS {
            match lookup(name).filter(|value| !value.is_empty()) {
                Some(value) => {
                    keys.insert(name.to_string(), value);
                }
                None => {
                    let err = CredentialError::Missing {
                        key: name.to_string(),
                    };
                    error!("{}", err);
                    return Err(err.into());
                }
            }
        }

        info!("All required API keys are set.");
        Ok(Self { keys })
    }

    /// Get a stored key by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }
}

impl fmt::Debug for ApiKeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ApiKeyManager").field("keys", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn full_env() -> HashMap<String, String> {
        REQUIRED_API_KEYS
            .iter()
            .map(|name| (name.to_string(), format!("{}-value", name.to_lowercase())))
            .collect()
    }

    #[test]
    fn test_all_keys_present() {
        let env = full_env();
        let manager = ApiKeyManager::from_lookup(|name| env.get(name).cloned()).unwrap();

        for name in REQUIRED_API_KEYS {
            assert_eq!(manager.get(name), env.get(name).map(String::as_str));
        }
    }

    #[test]
    fn test_unknown_key_is_absent() {
        let env = full_env();
        let manager = ApiKeyManager::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(manager.get("ANTHROPIC_API_KEY"), None);
    }

    #[test]
    fn test_each_missing_key_fails_construction() {
        for missing in REQUIRED_API_KEYS {
            let mut env = full_env();
            env.remove(missing);

            let err = ApiKeyManager::from_lookup(|name| env.get(name).cloned()).unwrap_err();
            match err {
                Error::Credential(CredentialError::Missing { key }) => assert_eq!(key, missing),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_first_missing_key_is_reported() {
        let err = ApiKeyManager::from_lookup(|_| None).unwrap_err();
        assert_eq!(err.to_string(), "GROQ_API_KEY is not set in environment variables.");
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("TAVILY_API_KEY".to_string(), String::new());

        let err = ApiKeyManager::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(err.to_string().starts_with("TAVILY_API_KEY"));
    }

    #[test]
    fn test_debug_does_not_leak_values() {
        let env = full_env();
        let manager = ApiKeyManager::from_lookup(|name| env.get(name).cloned()).unwrap();
        let rendered = format!("{:?}", manager);
        assert!(rendered.contains("GOOGLE_API_KEY"));
        assert!(!rendered.contains("google_api_key-value"));
    }
}
