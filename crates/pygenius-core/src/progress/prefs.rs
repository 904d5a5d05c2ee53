//! Flat key-value preference store
//!
//! The whole map is rewritten on every edit: first to a sibling temp file,
//! then renamed over the real one, so a crash never leaves a torn file.

use crate::error::{PyGeniusError, PyGeniusResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A single stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Text(String),
    Set(BTreeSet<String>),
}

/// Preference store, optionally backed by a JSON file
#[derive(Debug)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<String, PrefValue>>,
}

impl Preferences {
    /// Store that lives only as long as the value
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(BTreeMap::new()),
        }
    }

    /// Open (or start) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> PyGeniusResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                PyGeniusError::storage(format!(
                    "Failed to read preferences {}: {}",
                    path.display(),
                    e
                ))
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    PyGeniusError::storage(format!(
                        "Failed to parse preferences {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            debug!("No preferences at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.lock().get(key).cloned()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.values.lock().get(key) {
            Some(PrefValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.values.lock().get(key) {
            Some(PrefValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        match self.values.lock().get(key) {
            Some(PrefValue::Set(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put_i64(&self, key: &str, value: i64) -> PyGeniusResult<()> {
        self.edit(|values| {
            values.insert(key.to_string(), PrefValue::Int(value));
        })
    }

    pub fn put_string(&self, key: &str, value: impl Into<String>) -> PyGeniusResult<()> {
        let value = value.into();
        self.edit(|values| {
            values.insert(key.to_string(), PrefValue::Text(value));
        })
    }

    pub fn put_string_set(&self, key: &str, value: BTreeSet<String>) -> PyGeniusResult<()> {
        self.edit(|values| {
            values.insert(key.to_string(), PrefValue::Set(value));
        })
    }

    pub fn remove(&self, key: &str) -> PyGeniusResult<()> {
        self.edit(|values| {
            values.remove(key);
        })
    }

    /// Apply `change` and persist the result while holding the lock
    ///
    /// Read-modify-write sequences must go through here to stay atomic.
    pub fn edit<F, R>(&self, change: F) -> PyGeniusResult<R>
    where
        F: FnOnce(&mut BTreeMap<String, PrefValue>) -> R,
    {
        let mut values = self.values.lock();
        let result = change(&mut values);
        if let Some(path) = &self.path {
            write_atomically(path, &values)?;
        }
        Ok(result)
    }
}

fn write_atomically(path: &Path, values: &BTreeMap<String, PrefValue>) -> PyGeniusResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PyGeniusError::storage(format!(
                "Failed to create data directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(values)
        .map_err(|e| PyGeniusError::storage(format!("Failed to serialize preferences: {}", e)))?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, json).map_err(|e| {
        PyGeniusError::storage(format!("Failed to write {}: {}", tmp_path.display(), e))
    })?;
    fs::rename(&tmp_path, path).map_err(|e| {
        warn!("Could not replace {}: {}", path.display(), e);
        PyGeniusError::storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    Ok(())
}
