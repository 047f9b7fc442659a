//! Utilities for packaging a finished run.
//!
//! ```no_run
//! use snapshot_collector::utils::compress::archive_destination;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let zip_path = archive_destination(Path::new("C:\\snapshots\\20240101_120000"))?;
//! println!("Created archive: {}", zip_path.display());
//! # Ok(())
//! # }
//! ```

/// ZIP archive of the destination directory
pub mod compress;
