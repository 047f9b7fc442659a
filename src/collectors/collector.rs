use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::collectors::copy::{collect_directory, collect_file};
use crate::collectors::registry::export_registry;
use crate::config::{CopyTask, Task};
use crate::context::RunContext;
use crate::models::{CollectionOutcome, CollectionStatus};

/// Run every catalog task in order.
///
/// Produces exactly one outcome per task; a failing task is recorded in its
/// outcome and never stops the remaining tasks.
pub fn collect_all(context: &RunContext) -> Vec<CollectionOutcome> {
    let tasks = context.catalog.tasks();
    context.diagnostics.info(&format!("Collecting {} artifacts", tasks.len()));

    let outcomes: Vec<CollectionOutcome> = tasks.iter()
        .map(|task| collect_task(task, context))
        .collect();

    let collected = outcomes.iter().filter(|o| o.status == CollectionStatus::Success).count();
    context.diagnostics.info(&format!("Collected {} of {} artifacts", collected, outcomes.len()));
    outcomes
}

/// Execute a single task.
pub fn collect_task(task: &Task, context: &RunContext) -> CollectionOutcome {
    context.diagnostics.debug(&format!("Running {} task '{}' ({})", task.kind(), task.key(), task.source()));

    match task {
        Task::FileCopy(copy) => collect_file(copy, context),
        Task::DirectoryCopy(copy) => collect_directory(copy, context),
        Task::RegistryExport(export) => export_registry(export, context),
    }
}

/// Destination of a copy task inside the artifacts directory.
pub fn destination_for(task: &CopyTask, artifacts_dir: &Path) -> Result<PathBuf> {
    let name = match task.destination_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => base_name(&task.source)
            .ok_or_else(|| anyhow!("cannot derive a destination name from '{}'", task.source))?,
    };
    artifact_path(artifacts_dir, &name)
}

/// Join a destination name onto the artifacts directory.
///
/// The name must be a single plain path component, so the result always stays
/// directly inside `artifacts_dir`.
pub fn artifact_path(artifacts_dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(artifacts_dir.join(name)),
        _ => bail!("invalid destination name '{}'", name),
    }
}

/// Last component of a path written with either separator.
fn base_name(source: &str) -> Option<String> {
    source
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty() && !name.ends_with(':'))
        .map(str::to_string)
}

/// Shared existence check, copy and outcome bookkeeping for copy tasks.
pub(crate) fn collect_with(
    task: &CopyTask,
    context: &RunContext,
    exists: impl Fn(&Path) -> bool,
    copy: impl Fn(&Path, &Path) -> Result<()>,
) -> CollectionOutcome {
    let diagnostics = context.diagnostics;
    let source = Path::new(&task.source);

    if !exists(source) {
        let message = format!("Source not found: {}", task.source);
        diagnostics.warn(&message);
        return CollectionOutcome::missing(&task.key, &task.source, message);
    }

    let result = destination_for(task, &context.artifacts_dir).and_then(|destination| {
        if destination.exists() {
            diagnostics.debug(&format!("Destination already exists. Overwriting: {}", destination.display()));
        }
        copy(source, &destination).map(|_| destination)
    });

    match result {
        Ok(destination) => {
            diagnostics.info(&format!("Copied {} -> {}", task.source, destination.display()));
            CollectionOutcome::success(&task.key, &task.source, &destination, task.notes.clone())
        }
        Err(e) => {
            let message = format!("Failed to copy {}: {:#}", task.source, e);
            diagnostics.error(&message);
            CollectionOutcome::error(&task.key, &task.source, message)
        }
    }
}
