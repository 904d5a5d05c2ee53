//! Mocked installed-package list
//!
//! Nothing is downloaded. Installing records the package at version
//! `1.0.0` in the preference store under `installed_packages`, stored as
//! a set of `name==version` strings.

use crate::assist::types::PyPackage;
use crate::error::{PyGeniusError, PyGeniusResult};
use crate::progress::{PrefValue, Preferences};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

pub const KEY_INSTALLED_PACKAGES: &str = "installed_packages";
pub const MOCK_INSTALL_VERSION: &str = "1.0.0";

/// Packages present before the learner installs anything
pub const PREINSTALLED: [(&str, &str); 3] = [
    ("numpy", "1.24.3"),
    ("matplotlib", "3.7.1"),
    ("pandas", "2.0.3"),
];

#[derive(Debug, Clone)]
pub struct PackageRegistry {
    prefs: Arc<Preferences>,
}

impl PackageRegistry {
    pub fn new(prefs: Arc<Preferences>) -> Self {
        Self { prefs }
    }

    /// Installed packages ordered by name
    pub fn installed(&self) -> Vec<PyPackage> {
        installed_in(self.prefs.get_string_set(KEY_INSTALLED_PACKAGES))
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed().iter().any(|p| p.name == name)
    }

    /// Record `name` as installed; returns false if it already was
    pub fn install(&self, name: &str) -> PyGeniusResult<bool> {
        let name = validate_name(name)?;
        let added = self.update(|packages| {
            if packages.iter().any(|p| p.name == name) {
                return false;
            }
            packages.push(PyPackage::new(name, MOCK_INSTALL_VERSION));
            true
        })?;
        if added {
            info!("Installed {} {}", name, MOCK_INSTALL_VERSION);
        } else {
            debug!("{} already installed", name);
        }
        Ok(added)
    }

    /// Remove `name`; returns whether it was installed
    pub fn uninstall(&self, name: &str) -> PyGeniusResult<bool> {
        let name = name.trim();
        let removed = self.update(|packages| {
            let before = packages.len();
            packages.retain(|p| p.name != name);
            packages.len() != before
        })?;
        if removed {
            info!("Uninstalled {}", name);
        }
        Ok(removed)
    }

    /// Case-insensitive substring match on the name; a blank query lists all
    pub fn search(&self, query: &str) -> Vec<PyPackage> {
        let query = query.trim().to_lowercase();
        self.installed()
            .into_iter()
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Change the package list under the store lock; stored only when `change` returns true
    fn update<F>(&self, change: F) -> PyGeniusResult<bool>
    where
        F: FnOnce(&mut Vec<PyPackage>) -> bool,
    {
        self.prefs.edit(|values| {
            let stored = match values.get(KEY_INSTALLED_PACKAGES) {
                Some(PrefValue::Set(stored)) => Some(stored.clone()),
                _ => None,
            };
            let mut packages = installed_in(stored);
            let changed = change(&mut packages);
            if changed {
                let encoded: BTreeSet<String> = packages.iter().map(encode).collect();
                values.insert(KEY_INSTALLED_PACKAGES.to_string(), PrefValue::Set(encoded));
            }
            changed
        })
    }
}

fn installed_in(stored: Option<BTreeSet<String>>) -> Vec<PyPackage> {
    let Some(stored) = stored else {
        return seeded();
    };
    let mut packages: Vec<PyPackage> = stored.iter().filter_map(|s| decode(s)).collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

fn seeded() -> Vec<PyPackage> {
    let mut packages: Vec<PyPackage> = PREINSTALLED
        .iter()
        .map(|(name, version)| PyPackage::new(*name, *version))
        .collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

fn encode(package: &PyPackage) -> String {
    format!("{}=={}", package.name, package.version)
}

fn decode(raw: &str) -> Option<PyPackage> {
    let (name, version) = raw.split_once("==")?;
    if name.is_empty() {
        return None;
    }
    Some(PyPackage::new(name, version))
}

fn validate_name(name: &str) -> PyGeniusResult<&str> {
    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(name)
    } else {
        Err(PyGeniusError::invalid_input(format!(
            "Invalid package name: '{}'",
            name
        )))
    }
}
