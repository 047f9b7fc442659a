use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

/// Result of a single collection task.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    Success,
    /// The source (file, directory or registry key) does not exist.
    Missing,
    Error,
}

impl CollectionStatus {
    /// Label used for `{Key}Status` metadata values.
    pub fn display_label(&self) -> &'static str {
        match self {
            CollectionStatus::Success => "Ok",
            CollectionStatus::Missing => "Not Found",
            CollectionStatus::Error => "Error",
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionStatus::Success => "Success",
            CollectionStatus::Missing => "Missing",
            CollectionStatus::Error => "Error",
        };
        f.write_str(name)
    }
}

/// One outcome per catalog task, in catalog order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectionOutcome {
    pub key: String,
    pub source: String,
    /// Empty when nothing was produced.
    pub destination: PathBuf,
    pub status: CollectionStatus,
    pub message: Option<String>,
}

impl CollectionOutcome {
    pub fn success(key: &str, source: &str, destination: &Path, message: Option<String>) -> Self {
        Self {
            key: key.to_string(),
            source: source.to_string(),
            destination: destination.to_path_buf(),
            status: CollectionStatus::Success,
            message,
        }
    }

    pub fn missing(key: &str, source: &str, message: String) -> Self {
        Self::failed(key, source, CollectionStatus::Missing, message)
    }

    pub fn error(key: &str, source: &str, message: String) -> Self {
        Self::failed(key, source, CollectionStatus::Error, message)
    }

    fn failed(key: &str, source: &str, status: CollectionStatus, message: String) -> Self {
        Self {
            key: key.to_string(),
            source: source.to_string(),
            destination: PathBuf::new(),
            status,
            message: Some(message),
        }
    }

    /// Destination rendered for reports; empty string when absent.
    pub fn destination_display(&self) -> String {
        self.destination.to_string_lossy().to_string()
    }
}

/// Host facts reported by the host inspector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub total_ram_gb: Option<f64>,
    pub graphics_adapters: Vec<GraphicsAdapterInfo>,
}

/// A display adapter as reported by the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphicsAdapterInfo {
    pub name: String,
    pub memory_gb: Option<f64>,
    pub driver_version: String,
}

/// Case-insensitive key/value table consumed by every report writer.
///
/// Keys compare without regard to case; on collision the value is replaced
/// but the spelling of the first insertion is kept. Iteration is sorted by
/// the case-folded key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct MetadataMap {
    entries: BTreeMap<String, (String, String)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn fold(key: &str) -> String {
        key.to_uppercase()
    }

    /// Insert or replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.entry(Self::fold(&key)) {
            Entry::Occupied(mut entry) => entry.get_mut().1 = value,
            Entry::Vacant(entry) => {
                entry.insert((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&Self::fold(key)).map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&Self::fold(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in case-insensitive key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.values().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for MetadataMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<MetadataMap> for BTreeMap<String, String> {
    fn from(map: MetadataMap) -> Self {
        map.entries.into_values().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MetadataMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Convert a byte count to GiB rounded to two decimals.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    let gib = bytes as f64 / crate::constants::BYTES_PER_GIB;
    (gib * 100.0).round() / 100.0
}
