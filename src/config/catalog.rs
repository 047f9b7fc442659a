use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};

use crate::config::default_catalog::default_catalog;
use crate::config::env_vars::expand_env_vars;
use crate::config::tasks::{CopyTask, RegistryExportTask, Task};
use crate::diagnostics::Diagnostics;
use crate::models::MetadataMap;

/// Declarative collection tasks plus checklist bindings and default metadata.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskCatalog {
    #[serde(alias = "FileCopies")]
    pub file_copies: Vec<CopyTask>,
    #[serde(alias = "DirectoryCopies")]
    pub directory_copies: Vec<CopyTask>,
    #[serde(alias = "RegistryExports")]
    pub registry_exports: Vec<RegistryExportTask>,
    /// Sheet name -> (metadata key -> cell address)
    #[serde(alias = "ChecklistBindings")]
    pub checklist_bindings: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(alias = "DefaultMetadata")]
    pub default_metadata: MetadataMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "yaml" || ext == "yml" => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }
}

impl TaskCatalog {
    /// All tasks in execution order: file copies, directory copies, registry exports.
    pub fn tasks(&self) -> Vec<Task> {
        self.file_copies.iter().cloned().map(Task::FileCopy)
            .chain(self.directory_copies.iter().cloned().map(Task::DirectoryCopy))
            .chain(self.registry_exports.iter().cloned().map(Task::RegistryExport))
            .collect()
    }

    pub fn task_count(&self) -> usize {
        self.file_copies.len() + self.directory_copies.len() + self.registry_exports.len()
    }

    /// Keys used by more than one task, in first-repeat order.
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for task in self.tasks() {
            if !seen.insert(task.key().to_uppercase()) {
                duplicates.push(task.key().to_string());
            }
        }
        duplicates
    }

    /// Expand environment variable references in copy sources.
    pub fn expand_environment(&mut self) {
        for task in self.file_copies.iter_mut().chain(self.directory_copies.iter_mut()) {
            task.source = expand_env_vars(&task.source);
        }
    }

    /// Parse a catalog file. `Ok(None)` means the document was empty (`null`).
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        match CatalogFormat::for_path(path) {
            CatalogFormat::Yaml => serde_yaml::from_str(&content)
                .context("Failed to parse YAML config"),
            CatalogFormat::Json => serde_json::from_str(&content)
                .context("Failed to parse JSON config"),
        }
    }

    /// Write the catalog as JSON, or YAML for `.yaml`/`.yml` paths.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match CatalogFormat::for_path(path) {
            CatalogFormat::Yaml => serde_yaml::to_string(self)
                .context("Failed to serialize config to YAML")?,
            CatalogFormat::Json => serde_json::to_string_pretty(self)
                .context("Failed to serialize config to JSON")?,
        };

        fs::write(path, content)
            .context(format!("Failed to write config to {}", path.display()))
    }
}

/// Load the catalog at `path`, falling back to the built-in catalog.
///
/// Never fails: a missing, unreadable or unparseable file is reported as a
/// warning and the run continues with [`default_catalog`].
pub fn load_catalog(path: &Path, diagnostics: &dyn Diagnostics) -> TaskCatalog {
    let mut catalog = if !path.exists() {
        diagnostics.warn(&format!(
            "Configuration file '{}' not found. Using built-in defaults.",
            path.display()
        ));
        default_catalog()
    } else {
        match TaskCatalog::from_file(path) {
            Ok(Some(catalog)) => {
                diagnostics.debug(&format!("Loaded configuration from {}", path.display()));
                catalog
            }
            Ok(None) => {
                diagnostics.warn("Configuration file was empty. Using defaults.");
                default_catalog()
            }
            Err(e) => {
                diagnostics.warn(&format!("Failed to parse configuration file: {:#}. Using defaults.", e));
                default_catalog()
            }
        }
    };

    catalog.expand_environment();

    for key in catalog.duplicate_keys() {
        diagnostics.warn(&format!("Task key '{}' is used by more than one task", key));
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RunLog;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_JSON: &str = r#"{
        "fileCopies": [
            { "key": "Cfg", "source": "C:\\app\\app.cfg", "notes": "main config" }
        ],
        "DirectoryCopies": [
            { "Key": "Logs", "Source": "C:\\app\\logs", "DestinationName": "logs" }
        ],
        "registryExports": [
            { "key": "Reg", "registryPath": "HKEY_LOCAL_MACHINE\\SOFTWARE\\App", "exportFileName": "app.reg" }
        ],
        "checklistBindings": { "Sheet1": { "CfgStatus": "B2" } },
        "defaultMetadata": { "Customer": "ACME" }
    }"#;

    #[test]
    fn test_parse_json_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        fs::write(&path, SAMPLE_JSON).unwrap();

        let catalog = TaskCatalog::from_file(&path).unwrap().unwrap();
        let tasks = catalog.tasks();
        assert_eq!(tasks.len(), 3);
        assert!(matches!(tasks[0], Task::FileCopy(_)));
        assert!(matches!(tasks[1], Task::DirectoryCopy(_)));
        assert!(matches!(tasks[2], Task::RegistryExport(_)));
        assert_eq!(catalog.default_metadata.get("customer"), Some("ACME"));
        assert_eq!(catalog.checklist_bindings["Sheet1"]["CfgStatus"], "B2");
    }

    #[test]
    fn test_yaml_round_trip_via_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.yaml");

        let catalog = default_catalog();
        catalog.save_to_file(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("fileCopies:"));

        let loaded = TaskCatalog::from_file(&path).unwrap().unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let log = RunLog::new();

        let catalog = load_catalog(&temp_dir.path().join("absent.json"), &log);
        assert_eq!(catalog.task_count(), default_catalog().task_count());
        assert!(log.contents().contains("not found. Using built-in defaults."));
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ \"fileCopies\": [ ").unwrap();
        let log = RunLog::new();

        let catalog = load_catalog(&path, &log);
        assert_eq!(catalog, {
            let mut expected = default_catalog();
            expected.expand_environment();
            expected
        });
        assert!(log.contents().contains("Failed to parse configuration file"));
    }

    #[test]
    fn test_null_document_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("null.json");
        fs::write(&path, "null").unwrap();
        let log = RunLog::new();

        let catalog = load_catalog(&path, &log);
        assert_eq!(catalog.task_count(), 5);
        assert!(log.contents().contains("Configuration file was empty"));
    }

    #[test]
    fn test_duplicate_keys_are_reported() {
        let mut catalog = TaskCatalog::default();
        catalog.file_copies.push(CopyTask { key: "Cfg".into(), ..Default::default() });
        catalog.directory_copies.push(CopyTask { key: "cfg".into(), ..Default::default() });

        assert_eq!(catalog.duplicate_keys(), vec!["cfg".to_string()]);
        assert_eq!(catalog.tasks()[0].kind(), "file copy");
    }
}
