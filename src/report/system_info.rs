use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};

use crate::context::RunContext;
use crate::models::SystemInfo;

/// Render the plain-text host report.
pub fn render_system_info(system_info: &SystemInfo) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Windows Device Information");
    let _ = writeln!(text, "=========================");
    let _ = writeln!(text);
    let _ = writeln!(text, "OS Name: {}", system_info.os_name);
    let _ = writeln!(text, "OS Version: {}", system_info.os_version);
    if let Some(ram) = system_info.total_ram_gb {
        let _ = writeln!(text, "Total RAM: {:.2} GB", ram);
    }
    let _ = writeln!(text);
    let _ = writeln!(text, "Graphics Adapters:");

    for adapter in &system_info.graphics_adapters {
        let memory = adapter.memory_gb
            .map(|gb| format!("{:.2} GB", gb))
            .unwrap_or_else(|| "Unknown".to_string());
        let _ = writeln!(
            text,
            "  - {} (Memory: {}, Driver: {})",
            adapter.name, memory, adapter.driver_version
        );
    }

    text
}

/// Write `system_info.txt` into the destination root.
pub fn write_system_info(system_info: &SystemInfo, context: &RunContext) -> Result<()> {
    let path = &context.system_info_path;
    fs::write(path, render_system_info(system_info))
        .context(format!("Failed to write system information to {}", path.display()))?;

    context.diagnostics.info(&format!("System information written to {}", path.display()));
    Ok(())
}
