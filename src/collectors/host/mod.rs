//! Host inspection.
//!
//! Reports the operating system, installed memory and display adapters of
//! the running machine. The native inspector only exists on Windows; every
//! other platform gets a degraded inspector that reports what `sysinfo`
//! knows about the OS and nothing else. Inspection never fails the run.

pub mod degraded;
#[cfg(target_os = "windows")]
pub mod windows;

use crate::diagnostics::Diagnostics;
use crate::models::SystemInfo;

/// Source of [`SystemInfo`] for the current machine.
pub trait HostInspector {
    fn inspect(&self, diagnostics: &dyn Diagnostics) -> SystemInfo;
}

/// Get the appropriate inspector for the current platform
pub fn host_inspector() -> Box<dyn HostInspector> {
    #[cfg(target_os = "windows")]
    {
        log::debug!("Using Windows host inspector");
        Box::new(windows::WindowsInspector::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        log::debug!("Using degraded host inspector for unsupported platform");
        Box::new(degraded::DegradedInspector::new())
    }
}
