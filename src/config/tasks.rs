use serde::{Serialize, Deserialize};

use crate::constants::{NOTES_SUFFIX, PATH_SUFFIX, STATUS_SUFFIX};

/// Checklist keys a task's results should also be published under.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskBindings {
    #[serde(alias = "ChecklistPathKey", skip_serializing_if = "Option::is_none")]
    pub checklist_path_key: Option<String>,
    #[serde(alias = "ChecklistStatusKey", skip_serializing_if = "Option::is_none")]
    pub checklist_status_key: Option<String>,
    #[serde(alias = "ChecklistNotesKey", skip_serializing_if = "Option::is_none")]
    pub checklist_notes_key: Option<String>,
}

/// Copy of a single file or of a whole directory tree into the artifacts directory.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CopyTask {
    #[serde(alias = "Key")]
    pub key: String,
    #[serde(alias = "Source")]
    pub source: String,
    /// Name under the artifacts directory; defaults to the source's base name.
    #[serde(alias = "DestinationName", skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(alias = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub bindings: TaskBindings,
}

/// Export of a registry key through the platform export tool.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryExportTask {
    #[serde(alias = "Key")]
    pub key: String,
    #[serde(alias = "RegistryPath")]
    pub registry_path: String,
    #[serde(alias = "ExportFileName")]
    pub export_file_name: String,
    #[serde(alias = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub bindings: TaskBindings,
}

/// A collection task from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    FileCopy(CopyTask),
    DirectoryCopy(CopyTask),
    RegistryExport(RegistryExportTask),
}

impl Task {
    pub fn key(&self) -> &str {
        match self {
            Task::FileCopy(task) | Task::DirectoryCopy(task) => &task.key,
            Task::RegistryExport(task) => &task.key,
        }
    }

    /// Source location as written in reports.
    pub fn source(&self) -> &str {
        match self {
            Task::FileCopy(task) | Task::DirectoryCopy(task) => &task.source,
            Task::RegistryExport(task) => &task.registry_path,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            Task::FileCopy(task) | Task::DirectoryCopy(task) => task.notes.as_deref(),
            Task::RegistryExport(task) => task.notes.as_deref(),
        }
    }

    pub fn bindings(&self) -> &TaskBindings {
        match self {
            Task::FileCopy(task) | Task::DirectoryCopy(task) => &task.bindings,
            Task::RegistryExport(task) => &task.bindings,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Task::FileCopy(_) => "file copy",
            Task::DirectoryCopy(_) => "directory copy",
            Task::RegistryExport(_) => "registry export",
        }
    }
}

/// Metadata keys derived from a task key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeKeys {
    pub path: String,
    pub status: String,
    pub notes: String,
}

impl OutcomeKeys {
    pub fn for_key(key: &str) -> Self {
        Self {
            path: format!("{}{}", key, PATH_SUFFIX),
            status: format!("{}{}", key, STATUS_SUFFIX),
            notes: format!("{}{}", key, NOTES_SUFFIX),
        }
    }

    /// Binding keys that differ from the conventional `{key}Path/Status/Notes`.
    pub fn aliases(&self, bindings: &TaskBindings) -> OutcomeAliases {
        let differs = |alias: &Option<String>, conventional: &str| {
            alias
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty() && a.to_uppercase() != conventional.to_uppercase())
                .map(str::to_string)
        };

        OutcomeAliases {
            path: differs(&bindings.checklist_path_key, &self.path),
            status: differs(&bindings.checklist_status_key, &self.status),
            notes: differs(&bindings.checklist_notes_key, &self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeAliases {
    pub path: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
