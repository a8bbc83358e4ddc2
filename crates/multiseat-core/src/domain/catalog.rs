//! The device catalog: what a hardware scan found.
//!
//! A [`DeviceCatalog`] maps a category key (`"monitors"`, `"keyboards"`,
//! `"mice"`) to the ordered list of human-readable device descriptors found
//! for that category.
//!
//! # Lifecycle
//!
//! The catalog is rebuilt wholesale on every scan: the three scanned
//! categories are replaced, never merged.  There is no deduplication and no
//! device identity beyond the display string, so two identical keyboards show
//! up as two identical entries.
//!
//! Keys are plain strings rather than [`DeviceCategory`] values so that the
//! catalog can hold extra categories that a scan does not know about.  A scan
//! only ever overwrites its own three keys and leaves every other key alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the three categories a hardware scan fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Monitors,
    Keyboards,
    Mice,
}

impl DeviceCategory {
    /// All scanned categories in display order.
    pub const ALL: [DeviceCategory; 3] = [
        DeviceCategory::Monitors,
        DeviceCategory::Keyboards,
        DeviceCategory::Mice,
    ];

    /// Returns the catalog key for this category, e.g. `"mice"`.
    pub fn key(self) -> &'static str {
        match self {
            DeviceCategory::Monitors => "monitors",
            DeviceCategory::Keyboards => "keyboards",
            DeviceCategory::Mice => "mice",
        }
    }

    /// Returns the capitalised heading used when rendering the catalog.
    pub fn title(self) -> &'static str {
        match self {
            DeviceCategory::Monitors => "Monitors",
            DeviceCategory::Keyboards => "Keyboards",
            DeviceCategory::Mice => "Mice",
        }
    }
}

/// Category key → ordered device descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl DeviceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the device list for a scanned category.
    ///
    /// The key is always present afterwards, even when `devices` is empty.
    pub fn replace(&mut self, category: DeviceCategory, devices: Vec<String>) {
        self.entries.insert(category.key().to_string(), devices);
    }

    /// Stores a device list under an arbitrary key.
    pub fn insert_raw(&mut self, key: impl Into<String>, devices: Vec<String>) {
        self.entries.insert(key.into(), devices);
    }

    /// Returns the devices for a scanned category (empty if never scanned).
    pub fn devices(&self, category: DeviceCategory) -> &[String] {
        self.get(category.key())
    }

    /// Returns the devices stored under `key` (empty if absent).
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `key` has been written at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over every key in the catalog, scanned or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of devices across all keys.
    pub fn device_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
