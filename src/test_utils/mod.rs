//! Test utilities shared by the unit tests.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

/// Creates a temporary directory that is automatically cleaned up
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a temporary file with the given content
pub fn create_temp_file(content: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    use std::io::Write;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

/// Creates a test file structure in a temporary directory
///
/// ```text
/// file1.txt, file2.log
/// dir1/file3.txt, dir1/subdir1/file4.txt
/// dir2/file5.log
/// empty/
/// ```
pub fn create_test_file_structure() -> Result<TempDir> {
    let temp_dir = create_temp_dir()?;
    let base_path = temp_dir.path();

    fs::create_dir_all(base_path.join("dir1/subdir1"))?;
    fs::create_dir_all(base_path.join("dir2"))?;
    fs::create_dir_all(base_path.join("empty"))?;

    fs::write(base_path.join("file1.txt"), b"Test content 1")?;
    fs::write(base_path.join("file2.log"), b"Test log content")?;
    fs::write(base_path.join("dir1/file3.txt"), b"Test content 3")?;
    fs::write(base_path.join("dir1/subdir1/file4.txt"), b"Test content 4")?;
    fs::write(base_path.join("dir2/file5.log"), b"Another log file")?;

    Ok(temp_dir)
}

/// Creates a JSON task catalog whose file copy points at `source`
pub fn create_test_config(source: &str) -> Result<NamedTempFile> {
    let config = serde_json::json!({
        "fileCopies": [
            { "key": "Cfg", "source": source, "notes": "keep" }
        ],
        "checklistBindings": { "Sheet1": { "CfgStatus": "B2" } },
        "defaultMetadata": { "Customer": "ACME" }
    });

    create_temp_file(serde_json::to_string_pretty(&config)?.as_bytes())
}

/// Test data generators for common types
pub mod generators {
    use crate::models::{GraphicsAdapterInfo, SystemInfo};

    pub fn test_system_info() -> SystemInfo {
        SystemInfo {
            os_name: "Microsoft Windows 10 Pro".to_string(),
            os_version: "10.0.19045".to_string(),
            total_ram_gb: Some(15.87),
            graphics_adapters: vec![GraphicsAdapterInfo {
                name: "NVIDIA Quadro P620".to_string(),
                memory_gb: Some(2.0),
                driver_version: "31.0.15.2824".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_structure_layout() {
        let temp_dir = create_test_file_structure().unwrap();
        assert!(temp_dir.path().join("dir1/subdir1/file4.txt").is_file());
        assert!(temp_dir.path().join("empty").is_dir());
    }

    #[test]
    fn test_config_parses_as_catalog() {
        let file = create_test_config("C:\\app\\app.cfg").unwrap();
        let catalog = crate::config::TaskCatalog::from_file(file.path()).unwrap().unwrap();
        assert_eq!(catalog.file_copies[0].source, "C:\\app\\app.cfg");
    }
}
