//! Configuration management for the microblog client
//!
//! Handles persistent client settings: the API base URL and the keychain
//! service name credentials are stored under. Supports Windows, macOS, and
//! Linux config directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while persisting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Platform config directory could not be determined
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Filesystem operation failed
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be (de)serialized
    #[error("config serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `https://api.example.com`
    pub api_base_url: String,
    /// Keychain service name the credential is stored under
    #[serde(default = "default_credential_service")]
    pub credential_service: String,
}

fn default_credential_service() -> String {
    "microblog".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            credential_service: default_credential_service(),
        }
    }
}

impl ClientConfig {
    /// Gets the config directory path (cross-platform)
    fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA")
                .ok()
                .map(|p| PathBuf::from(p).join("Microblog"))
        }

        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|p| PathBuf::from(p).join("Library/Application Support/Microblog"))
        }

        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|p| PathBuf::from(p).join(".config"))
                })
                .map(|p| p.join("microblog"))
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    /// Gets the config file path, creating the directory if needed
    fn config_path() -> Option<PathBuf> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).ok()?;
        }

        Some(config_dir.join("config.json"))
    }

    /// Loads configuration from the platform config directory
    ///
    /// Missing or unreadable configuration falls back to the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("falling back to default config: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Loads configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves configuration to the platform config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Saves configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
