//! # Storage Module - Document Persistence Layer
//!
//! A small key/value store: each key maps to one JSON document in the data directory.
//! The console keeps exactly two documents:
//!
//! ```text
//! data/
//! ├── dinstar_config.json     ← gateway connection record (singleton)
//! └── dinstar_messages.json   ← message log, newest first
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dinstar_sms::storage::Storage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Storage::new("./data").await?;
//!     if let Some(cfg) = storage.load_gateway_config().await? {
//!         println!("Gateway at {}", cfg.endpoint());
//!     }
//!     let messages = storage.load_messages().await?;
//!     println!("{} messages", messages.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Write safety
//!
//! Documents are rewritten whole. A write takes an exclusive `fs2` lock on a
//! `.<name>.lock` sidecar, writes a temp file in the same directory, fsyncs it and
//! renames it over the destination, so readers see either the old or the new
//! document. A missing or zero-length document reads as `None`; a corrupt or
//! oversized one is an error.

use anyhow::{anyhow, Result};
use fs2::FileExt;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::gateway::GatewayConfig;
use crate::sms::MessageRecord;
use crate::validation::{secure_json_parse, validate_file_size};

/// Storage key of the gateway connection record.
pub const CONFIG_KEY: &str = "dinstar_config";
/// Storage key of the message log.
pub const MESSAGES_KEY: &str = "dinstar_messages";

const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;

/// Main storage interface
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: String,
    max_file_bytes: usize,
}

impl Storage {
    /// Initialize storage with the given data directory
    pub async fn new(data_dir: &str) -> Result<Self> {
        Self::with_limit(data_dir, DEFAULT_MAX_FILE_BYTES).await
    }

    /// Initialize storage with an explicit per-document size limit
    pub async fn with_limit(data_dir: &str, max_file_bytes: usize) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow!("Failed to create data directory {}: {}", data_dir, e))?;
        Ok(Storage {
            data_dir: data_dir.to_string(),
            max_file_bytes,
        })
    }

    fn document_path(&self, key: &str) -> PathBuf {
        Path::new(&self.data_dir).join(format!("{key}.json"))
    }

    /// Whether a non-empty document exists under `key`, without parsing it.
    /// A zero-length file counts as absent, like an empty browser storage value.
    pub async fn has_document(&self, key: &str) -> Result<bool> {
        match fs::metadata(self.document_path(key)).await {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(anyhow!("Failed to stat {}: {}", key, e)),
        }
    }

    /// Read and parse the document stored under `key`.
    pub async fn read_document<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.document_path(key);
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(anyhow!("Failed to stat {}: {}", path.display(), e)),
        };
        if meta.len() == 0 {
            return Ok(None);
        }
        validate_file_size(meta.len(), self.max_file_bytes as u64)
            .map_err(|e| anyhow!("{}: {}", path.display(), e))?;
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        let value = secure_json_parse(&content, self.max_file_bytes)
            .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;
        debug!("loaded document {} ({} bytes)", key, content.len());
        Ok(Some(value))
    }

    /// Serialize `value` and replace the document stored under `key`.
    pub async fn write_document<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", key, e))?;
        if content.len() > self.max_file_bytes {
            return Err(anyhow!(
                "Document {} would exceed size limit ({} bytes)",
                key,
                self.max_file_bytes
            ));
        }
        Self::write_file_locked(&self.document_path(key), &content).await?;
        debug!("stored document {} ({} bytes)", key, content.len());
        Ok(())
    }

    pub async fn has_gateway_config(&self) -> Result<bool> {
        self.has_document(CONFIG_KEY).await
    }

    pub async fn load_gateway_config(&self) -> Result<Option<GatewayConfig>> {
        self.read_document(CONFIG_KEY).await
    }

    /// Replace the stored gateway record wholesale.
    pub async fn save_gateway_config(&self, config: &GatewayConfig) -> Result<()> {
        self.write_document(CONFIG_KEY, config).await
    }

    /// Load the message log, newest first. An absent log is empty.
    pub async fn load_messages(&self) -> Result<Vec<MessageRecord>> {
        Ok(self.read_document(MESSAGES_KEY).await?.unwrap_or_default())
    }

    /// Persist the whole message log.
    pub async fn save_messages(&self, messages: &[MessageRecord]) -> Result<()> {
        self.write_document(MESSAGES_KEY, &messages).await
    }

    /// Replace `path` with `content` while holding an exclusive lock on a
    /// `.<name>.lock` sidecar. The destination itself is only touched by the final
    /// rename, so any earlier failure leaves the previous document (or none) intact.
    async fn write_file_locked(path: &Path, content: &str) -> Result<()> {
        use std::fs::{self, File, OpenOptions};
        use std::io::Write;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let base = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.json");

        // fs2 locks block; the console runs a single task so taking it inline is fine.
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(dir.join(format!(".{base}.lock")))
            .map_err(|e| anyhow!("Failed to open lock for {}: {}", path.display(), e))?;
        lock_file.lock_exclusive()?;

        let mut attempt = 0u32;
        let tmp_path = loop {
            let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), attempt));
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(mut tmp) => {
                    let written = tmp.write_all(content.as_bytes()).and_then(|_| tmp.flush());
                    if let Err(e) = written {
                        let _ = fs::remove_file(&candidate);
                        return Err(anyhow!("Failed to write {}: {}", candidate.display(), e));
                    }
                    let _ = tmp.sync_all();
                    break candidate;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt = attempt.saturating_add(1);
                }
                Err(e) => return Err(anyhow!("Failed to create temp file next to {}: {}", path.display(), e)),
            }
        };

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(anyhow!("Failed to replace {}: {}", path.display(), e));
        }

        // Make the rename durable; a failure here does not undo the write.
        if let Ok(dir_file) = File::open(dir) {
            let _ = dir_file.sync_all();
        }

        drop(lock_file);
        Ok(())
    }
}
