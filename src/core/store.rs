// src/core/store.rs
//! Local persistence for the saved list and the hidden set.
//!
//! Values are stored as JSON text under fixed keys so the layout matches
//! what the browser front end keeps in local storage.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::{Job, JobId};

pub const SAVED_JOBS_KEY: &str = "savedJobs";
pub const HIDDEN_JOB_IDS_KEY: &str = "hiddenJobIds";

pub type HiddenSet = BTreeSet<JobId>;

// ===== Storage Back Ends =====

pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }
}

/// A single JSON object on disk mapping keys to stored text.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store. A missing file is an empty store; so is a file that
    /// cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable store {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Cannot read store {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        debug!("Opened store {} with {} keys", path.display(), items.len());
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.items).context("Failed to encode store")?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

// ===== Persistence Adapter =====

pub struct LocalStore {
    backend: Box<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Parsed value under `key`, or `fallback` when the key is missing,
    /// null, or holds something that does not parse into `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let Some(text) = self.backend.get_item(key) else {
            return fallback;
        };

        match serde_json::from_str::<Option<T>>(&text) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                debug!("Discarding malformed value under {}: {}", key, e);
                fallback
            }
        }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)
            .with_context(|| format!("Failed to encode value for {}", key))?;
        self.backend.set_item(key, text)
    }

    pub fn saved_jobs(&self) -> Vec<Job> {
        self.read(SAVED_JOBS_KEY, Vec::new())
    }

    pub fn set_saved_jobs(&mut self, jobs: &[Job]) -> Result<()> {
        self.write(SAVED_JOBS_KEY, jobs)
    }

    pub fn hidden_ids(&self) -> HiddenSet {
        self.read(HIDDEN_JOB_IDS_KEY, HiddenSet::new())
    }

    pub fn set_hidden_ids(&mut self, hidden: &HiddenSet) -> Result<()> {
        self.write(HIDDEN_JOB_IDS_KEY, hidden)
    }
}
