use std::io;

use sysinfo::{System, SystemExt};
use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;

use crate::collectors::host::degraded::DegradedInspector;
use crate::collectors::host::HostInspector;
use crate::constants::WINDOWS_11_FIRST_BUILD;
use crate::diagnostics::Diagnostics;
use crate::models::{bytes_to_gib, GraphicsAdapterInfo, SystemInfo};

const CURRENT_VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";

/// Device class of display adapters
const DISPLAY_CLASS_KEY: &str =
    r"SYSTEM\CurrentControlSet\Control\Class\{4d36e968-e325-11ce-bfc1-08002be10318}";

/// Host inspector backed by the registry and `sysinfo`.
pub struct WindowsInspector {
    hklm: RegKey,
}

impl WindowsInspector {
    pub fn new() -> Self {
        WindowsInspector {
            hklm: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }

    /// Product name and `major.minor.build` version.
    fn os_identity(&self) -> io::Result<(String, String)> {
        let key = self.hklm.open_subkey(CURRENT_VERSION_KEY)?;
        let product: String = key.get_value("ProductName")?;
        let build: String = key.get_value("CurrentBuildNumber")?;
        let major: u32 = key.get_value("CurrentMajorVersionNumber").unwrap_or(10);
        let minor: u32 = key.get_value("CurrentMinorVersionNumber").unwrap_or(0);

        let build_number = build.trim().parse::<u32>().unwrap_or(0);
        // Windows 11 still reports "Windows 10" as its product name
        let product = if build_number >= WINDOWS_11_FIRST_BUILD && product.starts_with("Windows 10") {
            product.replacen("Windows 10", "Windows 11", 1)
        } else {
            product
        };

        let name = if product.starts_with("Microsoft") {
            product
        } else {
            format!("Microsoft {}", product)
        };

        Ok((name, format!("{}.{}.{}", major, minor, build.trim())))
    }

    fn total_ram_gb(&self) -> Option<f64> {
        let mut system = System::new();
        system.refresh_memory();
        match system.total_memory() {
            0 => None,
            bytes => Some(bytes_to_gib(bytes)),
        }
    }

    fn graphics_adapters(&self, diagnostics: &dyn Diagnostics) -> io::Result<Vec<GraphicsAdapterInfo>> {
        let class_key = self.hklm.open_subkey(DISPLAY_CLASS_KEY)?;
        let mut adapters = Vec::new();

        for name in class_key.enum_keys() {
            let name = name?;
            // Adapter instances are the numbered subkeys ("0000", "0001", ...)
            if !name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let adapter_key = match class_key.open_subkey(&name) {
                Ok(key) => key,
                Err(e) => {
                    diagnostics.debug(&format!("Skipping display adapter {}: {}", name, e));
                    continue;
                }
            };

            let description: String = match adapter_key.get_value("DriverDesc") {
                Ok(desc) => desc,
                // Instances without a driver description are leftovers of removed devices
                Err(_) => continue,
            };

            adapters.push(GraphicsAdapterInfo {
                name: if description.trim().is_empty() { "Unknown".to_string() } else { description },
                memory_gb: adapter_memory(&adapter_key).map(bytes_to_gib),
                driver_version: adapter_key.get_value("DriverVersion").unwrap_or_default(),
            });
        }

        Ok(adapters)
    }
}

impl Default for WindowsInspector {
    fn default() -> Self {
        Self::new()
    }
}

/// Dedicated video memory in bytes, as recorded by the display driver.
fn adapter_memory(adapter_key: &RegKey) -> Option<u64> {
    if let Ok(bytes) = adapter_key.get_value::<u64, _>("HardwareInformation.qwMemorySize") {
        return Some(bytes);
    }
    if let Ok(bytes) = adapter_key.get_value::<u32, _>("HardwareInformation.MemorySize") {
        return Some(u64::from(bytes));
    }

    // Some drivers store the size as REG_BINARY
    let raw = adapter_key.get_raw_value("HardwareInformation.MemorySize").ok()?;
    match raw.bytes.len() {
        4 => Some(u64::from(u32::from_le_bytes(raw.bytes[..4].try_into().ok()?))),
        8 => Some(u64::from_le_bytes(raw.bytes[..8].try_into().ok()?)),
        _ => None,
    }
}

impl HostInspector for WindowsInspector {
    fn inspect(&self, diagnostics: &dyn Diagnostics) -> SystemInfo {
        diagnostics.info("Gathering system information...");

        let (os_name, os_version) = self.os_identity().unwrap_or_else(|e| {
            diagnostics.warn(&format!("Failed to read Windows version from the registry: {}", e));
            (DegradedInspector::os_description(), String::new())
        });

        let total_ram_gb = self.total_ram_gb();
        if total_ram_gb.is_none() {
            diagnostics.warn("Unable to determine total physical memory");
        }

        let graphics_adapters = self.graphics_adapters(diagnostics).unwrap_or_else(|e| {
            diagnostics.warn(&format!("Failed to enumerate display adapters: {}", e));
            Vec::new()
        });

        SystemInfo {
            os_name,
            os_version,
            total_ram_gb,
            graphics_adapters,
        }
    }
}
