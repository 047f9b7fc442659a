use std::collections::BTreeMap;

use crate::config::catalog::TaskCatalog;
use crate::config::tasks::{CopyTask, RegistryExportTask, TaskBindings};
use crate::models::MetadataMap;

const CHECKLIST_SHEET: &str = "FAE Check List";
const PACKAGING_NOTE: &str = "備份後連著Check List一起打包寄出";

fn bindings(prefix: &str) -> TaskBindings {
    TaskBindings {
        checklist_path_key: Some(format!("{}Path", prefix)),
        checklist_status_key: Some(format!("{}Status", prefix)),
        checklist_notes_key: Some(format!("{}Notes", prefix)),
    }
}

fn copy_task(key: &str, source: &str, destination_name: &str) -> CopyTask {
    CopyTask {
        key: key.to_string(),
        source: source.to_string(),
        destination_name: Some(destination_name.to_string()),
        notes: Some(PACKAGING_NOTE.to_string()),
        bindings: bindings(key),
    }
}

/// Catalog used when no configuration file is available or it cannot be parsed.
pub fn default_catalog() -> TaskCatalog {
    let file_copies = vec![
        copy_task("SoftwareLimit", r"C:\TR7600\TriMotion.cfg", "TriMotion.cfg"),
    ];

    let directory_copies = vec![
        copy_task("Library", r"C:\TRI_AXI", "TRI_AXI"),
        copy_task("Calibration", r"C:\TR7600\Log\Calibration", "Calibration"),
        copy_task("GrayLevel", r"C:\TR7600\Log\GrayLevel", "GrayLevel"),
    ];

    let registry_exports = vec![
        RegistryExportTask {
            key: "TriRegistry".to_string(),
            registry_path: r"HKEY_LOCAL_MACHINE\SOFTWARE\TRI\TR7600".to_string(),
            export_file_name: "TR7600.reg".to_string(),
            notes: Some(PACKAGING_NOTE.to_string()),
            bindings: bindings("Registry"),
        },
    ];

    let cells: BTreeMap<String, String> = [
        ("Date", "C3"),
        ("FAE", "C4"),
        ("Customer", "C5"),
        ("MachineModel", "C6"),
        ("SerialNumber", "C7"),
        ("TubeSerial", "C8"),
        ("CameraSerial", "C9"),
        ("ResolutionSpec", "C10"),
        ("Height", "C11"),
        ("WindowsOS", "C13"),
        ("RAM", "C14"),
        ("GraphicsCard", "C15"),
        ("AxiVersion", "C16"),
        ("PlcVersion", "C17"),
        ("SoftwareLimitPath", "C19"),
        ("SoftwareLimitStatus", "D19"),
        ("SoftwareLimitNotes", "F19"),
        ("LibraryPath", "C20"),
        ("LibraryStatus", "D20"),
        ("LibraryNotes", "F20"),
        ("RegistryPath", "C21"),
        ("RegistryStatus", "D21"),
        ("RegistryNotes", "F21"),
        ("CalibrationPath", "C22"),
        ("CalibrationStatus", "D22"),
        ("CalibrationNotes", "F22"),
        ("GrayLevelPath", "C23"),
        ("GrayLevelStatus", "D23"),
        ("GrayLevelNotes", "F23"),
    ]
    .iter()
    .map(|(key, cell)| (key.to_string(), cell.to_string()))
    .collect();

    let mut checklist_bindings = BTreeMap::new();
    checklist_bindings.insert(CHECKLIST_SHEET.to_string(), cells);

    let default_metadata: MetadataMap = [
        "SoftwareLimitNotes",
        "LibraryNotes",
        "RegistryNotes",
        "CalibrationNotes",
        "GrayLevelNotes",
    ]
    .iter()
    .map(|key| (*key, PACKAGING_NOTE))
    .collect();

    TaskCatalog {
        file_copies,
        directory_copies,
        registry_exports,
        checklist_bindings,
        default_metadata,
    }
}
