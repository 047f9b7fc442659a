use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

use crate::collectors::collector::artifact_path;
use crate::config::RegistryExportTask;
use crate::context::RunContext;
use crate::models::{CollectionOutcome, CollectionStatus};

/// Suppresses the console window of the export tool.
#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Export a registry key with the configured export tool.
///
/// A tool that runs but exits non-zero yields `Missing` (the key usually does
/// not exist) unless it reports access denial, which yields `Error`. A tool
/// that cannot be started yields `Error`.
pub fn export_registry(task: &RegistryExportTask, context: &RunContext) -> CollectionOutcome {
    let diagnostics = context.diagnostics;
    let destination = match artifact_path(&context.artifacts_dir, task.export_file_name.trim()) {
        Ok(destination) => destination,
        Err(e) => {
            let message = format!("Failed to export registry {}: {:#}", task.registry_path, e);
            diagnostics.error(&message);
            return CollectionOutcome::error(&task.key, &task.registry_path, message);
        }
    };

    let output = match run_export_tool(&context.registry_tool, &task.registry_path, &destination) {
        Ok(output) => output,
        Err(e) => {
            let message = format!("Failed to export registry {}: {:#}", task.registry_path, e);
            diagnostics.error(&message);
            return CollectionOutcome::error(&task.key, &task.registry_path, message);
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let exit = match output.status.code() {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        };
        let message = format!("{} {}. {}", tool_name(&context.registry_tool), exit, stderr.trim());
        let message = message.trim_end().to_string();

        return match classify_failure(&stderr) {
            CollectionStatus::Error => {
                diagnostics.error(&message);
                CollectionOutcome::error(&task.key, &task.registry_path, message)
            }
            _ => {
                diagnostics.warn(&message);
                CollectionOutcome::missing(&task.key, &task.registry_path, message)
            }
        };
    }

    diagnostics.info(&format!("Exported registry {} -> {}", task.registry_path, destination.display()));
    CollectionOutcome::success(&task.key, &task.registry_path, &destination, task.notes.clone())
}

/// Status for a tool that ran and reported failure.
///
/// Only the English `access is denied` text is recognized. A localized
/// reg.exe prints this in the console's OEM code page, which arrives here
/// mangled by the lossy UTF-8 decode, so on such systems an access failure
/// is reported as `Missing`. reg.exe exits with 1 in both cases, so the exit
/// code cannot tell them apart either.
pub fn classify_failure(diagnostic_text: &str) -> CollectionStatus {
    if diagnostic_text.to_lowercase().contains("access is denied") {
        CollectionStatus::Error
    } else {
        CollectionStatus::Missing
    }
}

fn tool_name(tool: &Path) -> String {
    tool.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| tool.display().to_string())
}

/// Run `{tool} export <key> <file> /y` and drain both output streams.
fn run_export_tool(tool: &Path, registry_path: &str, destination: &Path) -> Result<Output> {
    let mut command = Command::new(tool);
    command
        .arg("export")
        .arg(registry_path)
        .arg(destination)
        .arg("/y")
        .stdin(Stdio::null());

    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    command.output()
        .context(format!("Unable to launch {}", tool.display()))
}
