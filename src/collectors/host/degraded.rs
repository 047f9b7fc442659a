use sysinfo::{System, SystemExt};

use crate::collectors::host::HostInspector;
use crate::diagnostics::Diagnostics;
use crate::models::SystemInfo;

/// Inspector for platforms without the Windows registry.
///
/// Reports an OS description only: empty version, unknown RAM, no adapters.
pub struct DegradedInspector;

impl DegradedInspector {
    pub fn new() -> Self {
        DegradedInspector
    }

    /// Human-readable OS description, e.g. "Linux 22.04 Ubuntu".
    pub fn os_description() -> String {
        System::new()
            .long_os_version()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", std::env::consts::OS, std::env::consts::ARCH))
    }
}

impl Default for DegradedInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl HostInspector for DegradedInspector {
    fn inspect(&self, diagnostics: &dyn Diagnostics) -> SystemInfo {
        let description = Self::os_description();
        diagnostics.warn(&format!(
            "System information collection requires Windows APIs. Current platform: {}. Skipping detailed query.",
            description
        ));

        SystemInfo {
            os_name: description,
            os_version: String::new(),
            total_ram_gb: None,
            graphics_adapters: Vec::new(),
        }
    }
}
