//! Metadata merging.
//!
//! Folds catalog defaults, user overrides, host facts and collection
//! outcomes into the single [`MetadataMap`] every report writer renders.
//! Later sources overwrite earlier ones:
//!
//! 1. catalog default metadata
//! 2. `--meta` overrides
//! 3. `Date` (only when still unset)
//! 4. host facts: `WindowsOS`, `RAM`, `GraphicsCard` (when adapters exist), `SystemInfoPath`
//! 5. per outcome: `{Key}Status`, `{Key}Path` (when produced), `{Key}Notes`

use std::collections::HashMap;
use std::path::Path;

use crate::config::{OutcomeKeys, Task, TaskBindings, TaskCatalog};
use crate::constants::{
    KEY_DATE, KEY_GRAPHICS_CARD, KEY_RAM, KEY_SYSTEM_INFO_PATH, KEY_WINDOWS_OS, METADATA_DATE_FORMAT,
};
use crate::context::RunContext;
use crate::models::{CollectionOutcome, MetadataMap, SystemInfo};

/// Merge everything known about the run into one map.
pub fn build_metadata(
    context: &RunContext,
    system_info: &SystemInfo,
    outcomes: &[CollectionOutcome],
) -> MetadataMap {
    let data = merge_metadata(
        &context.catalog,
        &context.metadata_overrides,
        system_info,
        &context.system_info_path,
        outcomes,
    );
    context.diagnostics.debug(&format!("Merged {} metadata entries", data.len()));
    data
}

/// Merge explicit inputs; see the module docs for precedence.
pub fn merge_metadata(
    catalog: &TaskCatalog,
    overrides: &MetadataMap,
    system_info: &SystemInfo,
    system_info_path: &Path,
    outcomes: &[CollectionOutcome],
) -> MetadataMap {
    let defaults = &catalog.default_metadata;
    let mut data = MetadataMap::new();

    for (key, value) in defaults.iter().chain(overrides.iter()) {
        data.insert(key, value);
    }

    if !data.contains_key(KEY_DATE) {
        data.insert(KEY_DATE, chrono::Local::now().format(METADATA_DATE_FORMAT).to_string());
    }

    data.insert(KEY_WINDOWS_OS, windows_os_label(system_info));
    data.insert(KEY_RAM, ram_label(system_info.total_ram_gb));
    if !system_info.graphics_adapters.is_empty() {
        data.insert(KEY_GRAPHICS_CARD, graphics_label(system_info));
    }
    data.insert(KEY_SYSTEM_INFO_PATH, system_info_path.display().to_string());

    let tasks = catalog.tasks();
    let lookup = bindings_by_key(&tasks);

    for (index, outcome) in outcomes.iter().enumerate() {
        let keys = OutcomeKeys::for_key(&outcome.key);
        apply_outcome(&mut data, defaults, outcome, &keys);

        // Outcomes normally line up with the catalog's task order.
        let bindings = tasks.get(index)
            .filter(|task| task.key().to_uppercase() == outcome.key.to_uppercase())
            .map(Task::bindings)
            .or_else(|| lookup.get(&outcome.key.to_uppercase()).copied());

        if let Some(bindings) = bindings {
            apply_aliases(&mut data, outcome, &keys, bindings);
        }
    }

    data
}

/// Bindings of the first task for each upper-cased key.
fn bindings_by_key(tasks: &[Task]) -> HashMap<String, &TaskBindings> {
    let mut lookup = HashMap::new();
    for task in tasks {
        lookup.entry(task.key().to_uppercase()).or_insert(task.bindings());
    }
    lookup
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn apply_outcome(data: &mut MetadataMap, defaults: &MetadataMap, outcome: &CollectionOutcome, keys: &OutcomeKeys) {
    let destination = outcome.destination_display();
    if !destination.trim().is_empty() {
        data.insert(keys.path.as_str(), destination);
    }

    data.insert(keys.status.as_str(), outcome.status.display_label());

    if let Some(message) = blank_to_none(outcome.message.as_deref()) {
        data.insert(keys.notes.as_str(), message);
    } else if !data.contains_key(&keys.notes) {
        if let Some(fallback) = blank_to_none(defaults.get(&keys.notes)) {
            data.insert(keys.notes.as_str(), fallback);
        }
    }
}

/// Mirror an outcome's values into the task's checklist binding keys.
fn apply_aliases(data: &mut MetadataMap, outcome: &CollectionOutcome, keys: &OutcomeKeys, bindings: &TaskBindings) {
    let aliases = keys.aliases(bindings);

    if let Some(alias) = &aliases.path {
        let destination = outcome.destination_display();
        if !destination.trim().is_empty() {
            data.insert(alias.as_str(), destination);
        }
    }

    if let Some(alias) = &aliases.status {
        data.insert(alias.as_str(), outcome.status.display_label());
    }

    if let Some(alias) = &aliases.notes {
        if let Some(message) = blank_to_none(outcome.message.as_deref()) {
            data.insert(alias.as_str(), message);
        } else if !data.contains_key(alias) {
            if let Some(notes) = data.get(&keys.notes).map(str::to_string) {
                data.insert(alias.as_str(), notes);
            }
        }
    }
}

/// OS name and version joined by a space, skipping blank parts.
pub fn windows_os_label(system_info: &SystemInfo) -> String {
    [system_info.os_name.as_str(), system_info.os_version.as_str()]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ram_label(total_ram_gb: Option<f64>) -> String {
    total_ram_gb.map(|gb| format!("{:.2} GB", gb)).unwrap_or_default()
}

/// `"{name} ({mem} GB) - Driver {driver}"` per adapter, joined by `"; "`.
pub fn graphics_label(system_info: &SystemInfo) -> String {
    system_info.graphics_adapters
        .iter()
        .map(|adapter| {
            let mut label = adapter.name.clone();
            if let Some(memory) = adapter.memory_gb {
                label.push_str(&format!(" ({:.2} GB)", memory));
            }
            if !adapter.driver_version.trim().is_empty() {
                label.push_str(&format!(" - Driver {}", adapter.driver_version));
            }
            label
        })
        .collect::<Vec<_>>()
        .join("; ")
}
