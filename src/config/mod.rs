//! # Configuration Management Module
//!
//! Settings of the console itself: where documents are stored, how logging behaves
//! and which language the screens use. The gateway connection record is *not* part
//! of this file; it is operator data kept in storage (see [`crate::gateway`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dinstar_sms::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then read it back
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!     println!("Data dir: {}", config.storage.data_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//! max_file_bytes = 1048576
//!
//! [logging]
//! level = "info"
//! file = "dinstar-sms.log"
//!
//! [ui]
//! language = "sq"
//! sample_number = "0697040852"
//! sample_user_id = 1234
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use tokio::fs;

use crate::i18n::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Documents larger than this are refused instead of parsed.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

fn default_max_file_bytes() -> usize {
    1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
    /// Recipient shown in test commands while the draft has none.
    #[serde(default = "default_sample_number")]
    pub sample_number: String,
    /// `user_id` placed in rendered request bodies.
    #[serde(default = "default_sample_user_id")]
    pub sample_user_id: u32,
}

fn default_sample_number() -> String {
    "0697040852".to_string()
}

fn default_sample_user_id() -> u32 {
    1234
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            sample_number: default_sample_number(),
            sample_user_id: default_sample_user_id(),
        }
    }
}

impl Config {
    /// Parse the TOML settings file at `path`; sections left out take their defaults.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    /// A file that exists but does not parse is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        match fs::metadata(path).await {
            Ok(_) => Self::load(path).await,
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(anyhow!("Failed to stat config file {}: {}", path, e)),
        }
    }

    /// Write the default settings to `path`, overwriting whatever is there.
    /// Used by `init`.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[storage]\ndata_dir = \"/tmp/x\"\n").unwrap();
        assert_eq!(cfg.storage.data_dir, "/tmp/x");
        assert_eq!(cfg.storage.max_file_bytes, 1024 * 1024);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.ui.language, Language::Albanian);
        assert_eq!(cfg.ui.sample_user_id, 1234);
    }

    #[test]
    fn language_parses_from_code() {
        let cfg: Config = toml::from_str("[ui]\nlanguage = \"en\"\n").unwrap();
        assert_eq!(cfg.ui.language, Language::English);
    }

    #[tokio::test]
    async fn default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let cfg = Config::load(path).await.unwrap();
        assert_eq!(cfg.storage.data_dir, "./data");
        assert!(cfg.logging.file.is_none());
    }

    #[tokio::test]
    async fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cfg = Config::load_or_default(path.to_str().unwrap()).await.unwrap();
        assert_eq!(cfg.ui.sample_number, "0697040852");
    }
}
