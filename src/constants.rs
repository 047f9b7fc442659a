//! Constants used throughout the snapshot collector.
//!
//! This module centralizes output file names, date formats and the
//! well-known metadata keys so they stay consistent across the collection
//! engine, the metadata merger and the report writers.

// Output layout under the destination root

/// Directory (under the destination root) receiving copied artifacts
pub const ARTIFACTS_DIR_NAME: &str = "artifacts";

/// Directory (under the destination root) receiving the run log
pub const LOGS_DIR_NAME: &str = "logs";

/// Run log file name
pub const LOG_FILE_NAME: &str = "collector.log";

/// Plain-text system information report
pub const SYSTEM_INFO_FILE_NAME: &str = "system_info.txt";

/// CSV snapshot of merged metadata and artifact outcomes
pub const SNAPSHOT_FILE_NAME: &str = "checklist_snapshot.csv";

/// Log written to the working directory when the run fails outright
pub const FALLBACK_ERROR_LOG: &str = "collector-error.log";

/// Catalog file looked up next to the executable when `--config` is absent
pub const DEFAULT_CONFIG_FILE_NAME: &str = "collector.config.json";

/// Parent directory for timestamped destinations when `--dest` is absent
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "collector-output";

/// Registry export program
pub const DEFAULT_REGISTRY_TOOL: &str = "reg.exe";

// Date formats (chrono strftime syntax)

/// Timestamp used for default destinations and checklist copies
pub const FOLDER_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Value of the `Date` metadata key when none is supplied
pub const METADATA_DATE_FORMAT: &str = "%Y/%m/%d";

/// Timestamp prefix of every run log line
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Well-known metadata keys

pub const KEY_DATE: &str = "Date";
pub const KEY_WINDOWS_OS: &str = "WindowsOS";
pub const KEY_RAM: &str = "RAM";
pub const KEY_GRAPHICS_CARD: &str = "GraphicsCard";
pub const KEY_SYSTEM_INFO_PATH: &str = "SystemInfoPath";
pub const KEY_CHECKLIST_PATH: &str = "ChecklistPath";

// Suffixes appended to a task key to derive its outcome metadata keys
pub const PATH_SUFFIX: &str = "Path";
pub const STATUS_SUFFIX: &str = "Status";
pub const NOTES_SUFFIX: &str = "Notes";

/// Bytes per GiB, used for RAM and adapter memory conversions
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Windows build number from which the product is Windows 11
pub const WINDOWS_11_FIRST_BUILD: u32 = 22000;
