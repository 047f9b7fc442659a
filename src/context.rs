use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::TaskCatalog;
use crate::constants::{
    ARTIFACTS_DIR_NAME, DEFAULT_REGISTRY_TOOL, LOG_FILE_NAME, LOGS_DIR_NAME,
    SNAPSHOT_FILE_NAME, SYSTEM_INFO_FILE_NAME,
};
use crate::diagnostics::Diagnostics;
use crate::models::MetadataMap;

/// Resolved inputs and output locations of a single collection run.
pub struct RunContext<'a> {
    pub destination_root: PathBuf,
    pub artifacts_dir: PathBuf,
    pub log_file_path: PathBuf,
    pub system_info_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub checklist_template_path: Option<PathBuf>,
    pub registry_tool: PathBuf,
    pub catalog: TaskCatalog,
    pub metadata_overrides: MetadataMap,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> RunContext<'a> {
    /// Create the context and the artifacts directory under `destination_root`.
    pub fn new(
        destination_root: &Path,
        catalog: TaskCatalog,
        diagnostics: &'a dyn Diagnostics,
    ) -> Result<Self> {
        let artifacts_dir = destination_root.join(ARTIFACTS_DIR_NAME);
        fs::create_dir_all(&artifacts_dir)
            .context(format!("Failed to create artifacts directory: {}", artifacts_dir.display()))?;

        Ok(Self {
            destination_root: destination_root.to_path_buf(),
            artifacts_dir,
            log_file_path: destination_root.join(LOGS_DIR_NAME).join(LOG_FILE_NAME),
            system_info_path: destination_root.join(SYSTEM_INFO_FILE_NAME),
            snapshot_path: destination_root.join(SNAPSHOT_FILE_NAME),
            checklist_template_path: None,
            registry_tool: PathBuf::from(DEFAULT_REGISTRY_TOOL),
            catalog,
            metadata_overrides: MetadataMap::new(),
            diagnostics,
        })
    }

    pub fn with_overrides(mut self, overrides: MetadataMap) -> Self {
        self.metadata_overrides = overrides;
        self
    }

    pub fn with_checklist_template(mut self, template: Option<PathBuf>) -> Self {
        self.checklist_template_path = template;
        self
    }

    pub fn with_registry_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.registry_tool = tool.into();
        self
    }
}
