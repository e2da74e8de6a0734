//! Flat JSON file holding stored API keys.
//!
//! The file is read, modified in memory and written back without locking, so
//! two processes editing it at the same time can lose an update.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{fs as atomic_fs, paths};

/// File name of the key store inside the config directory.
pub const KEY_STORE_FILE: &str = "keys.json";

/// On-disk layout of the key store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStoreData {
    #[serde(default)]
    pub openai_api_keys: Vec<String>,
    /// Reserved; never written by slidetl.
    #[serde(default)]
    pub chat_history: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct KeyStore {
    path: PathBuf,
    data: KeyStoreData,
}

impl KeyStore {
    pub fn default_path() -> Result<PathBuf> {
        Ok(paths::config_dir()?.join(KEY_STORE_FILE))
    }

    /// Opens the key store at its default location.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Opens the key store, creating it with empty defaults if absent.
    pub fn open(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            let store = Self {
                path,
                data: KeyStoreData::default(),
            };
            store.save()?;
            crate::status!("Created key store at {}", store.path.display());
            return Ok(store);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read key store: {}", path.display()))?;
        let data = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse key store: {}", path.display()))?;

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> &[String] {
        &self.data.openai_api_keys
    }

    /// The key used when no provider key is configured.
    pub fn first(&self) -> Option<&str> {
        self.data.openai_api_keys.first().map(String::as_str)
    }

    /// Adds a key; returns `false` if it was already stored.
    pub fn add(&mut self, key: &str) -> Result<bool> {
        let key = key.trim();
        if key.is_empty() {
            bail!("API key must not be empty");
        }
        if self.data.openai_api_keys.iter().any(|k| k == key) {
            return Ok(false);
        }
        self.data.openai_api_keys.push(key.to_string());
        Ok(true)
    }

    /// Removes the key at a zero-based index and returns it.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if index >= self.data.openai_api_keys.len() {
            bail!(
                "No key at position {}; {} key(s) stored",
                index + 1,
                self.data.openai_api_keys.len()
            );
        }
        Ok(self.data.openai_api_keys.remove(index))
    }

    pub fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize key store")?;
        atomic_fs::atomic_write(&self.path, contents)
    }
}

/// Masks a key for display, keeping a short prefix and suffix.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
