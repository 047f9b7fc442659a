use std::path::PathBuf;

use anyhow::Result;

use crate::collectors::collector::collect_all;
use crate::collectors::host::HostInspector;
use crate::constants::KEY_CHECKLIST_PATH;
use crate::context::RunContext;
use crate::models::{CollectionOutcome, MetadataMap};
use crate::report::checklist::fill_checklist;
use crate::report::csv::write_csv_snapshot;
use crate::report::metadata::build_metadata;
use crate::report::system_info::write_system_info;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<CollectionOutcome>,
    pub metadata: MetadataMap,
    pub checklist_path: Option<PathBuf>,
}

/// Run one collection into an initialized context.
///
/// Inspects the host, runs every task, merges metadata, fills the checklist
/// (when requested), writes the CSV snapshot and flushes the run log to
/// `logs/collector.log`. Per-task and checklist failures are logged and do
/// not fail the run.
pub fn execute(context: &RunContext, inspector: &dyn HostInspector) -> Result<RunReport> {
    let diagnostics = context.diagnostics;

    let system_info = inspector.inspect(diagnostics);
    write_system_info(&system_info, context)?;

    let outcomes = collect_all(context);
    let mut metadata = build_metadata(context, &system_info, &outcomes);

    let checklist_path = fill_checklist(context, &metadata).unwrap_or_else(|e| {
        diagnostics.error(&format!("Failed to populate checklist: {:#}", e));
        None
    });
    if let Some(path) = &checklist_path {
        metadata.insert(KEY_CHECKLIST_PATH, path.display().to_string());
    }

    write_csv_snapshot(context, &metadata, &outcomes)?;

    diagnostics.info("Collection completed successfully.");
    diagnostics.flush_to(&context.log_file_path)?;

    Ok(RunReport {
        outcomes,
        metadata,
        checklist_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaskCatalog;
    use crate::diagnostics::{Diagnostics, RunLog};
    use crate::models::SystemInfo;
    use crate::test_utils::generators;
    use std::fs;
    use tempfile::TempDir;

    struct FixedInspector;

    impl HostInspector for FixedInspector {
        fn inspect(&self, _diagnostics: &dyn Diagnostics) -> SystemInfo {
            generators::test_system_info()
        }
    }

    #[test]
    fn test_execute_writes_all_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let log = RunLog::new();
        let context = RunContext::new(temp_dir.path(), TaskCatalog::default(), &log).unwrap();

        let report = execute(&context, &FixedInspector).unwrap();

        assert!(report.outcomes.is_empty());
        assert!(report.checklist_path.is_none());
        assert_eq!(report.metadata.get("GraphicsCard"), Some("NVIDIA Quadro P620 (2.00 GB) - Driver 31.0.15.2824"));
        assert!(context.system_info_path.is_file());
        assert!(context.snapshot_path.is_file());

        let log_file = fs::read_to_string(&context.log_file_path).unwrap();
        assert!(log_file.contains("INFO  Collection completed successfully."));
    }

    #[test]
    fn test_broken_checklist_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let template = temp_dir.path().join("template.xlsx");
        fs::write(&template, b"not a workbook").unwrap();

        let log = RunLog::new();
        let out = temp_dir.path().join("run");
        let context = RunContext::new(&out, TaskCatalog::default(), &log).unwrap()
            .with_checklist_template(Some(template));

        let report = execute(&context, &FixedInspector).unwrap();
        assert!(report.checklist_path.is_none());
        assert!(!report.metadata.contains_key("ChecklistPath"));
        assert!(log.contents().contains("ERROR Failed to populate checklist"));
    }
}
