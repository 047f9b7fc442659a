use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::debug;
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

/// Extensions whose content is already compressed.
const COMPRESSED_EXTENSIONS: &[&str] = &["zip", "xlsx", "gz", "7z", "png", "jpg", "jpeg"];

/// Zip options for a file: stored when already compressed, deflated otherwise.
pub fn compression_options(path: &Path) -> FileOptions {
    let already_compressed = path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| COMPRESSED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    let options = FileOptions::default().unix_permissions(0o644);
    if already_compressed {
        options.compression_method(CompressionMethod::Stored)
    } else {
        options.compression_method(CompressionMethod::Deflated)
    }
}

/// Archive path for a destination root: `{root}.zip` next to it.
pub fn archive_path_for(destination_root: &Path) -> Result<PathBuf> {
    let name = destination_root.file_name()
        .ok_or_else(|| anyhow!("Cannot archive {}: no directory name", destination_root.display()))?;
    let mut archive_name = name.to_os_string();
    archive_name.push(".zip");
    Ok(destination_root.with_file_name(archive_name))
}

/// Zip the whole destination root into `{root}.zip`.
///
/// Entry names are relative to the root and always use `/`.
///
/// ```no_run
/// # use std::path::Path;
/// # use snapshot_collector::utils::compress::archive_destination;
/// let zip_path = archive_destination(Path::new("C:\\snapshots\\20240115_143052"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn archive_destination(destination_root: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    let zip_path = archive_path_for(destination_root)?;

    let zip_file = fs::File::create(&zip_path)
        .context(format!("Failed to create zip file {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(zip_file);
    let mut file_count = 0;

    for entry in WalkDir::new(destination_root).min_depth(1).sort_by_file_name() {
        let entry = entry.context("Failed to walk destination directory")?;
        let rel_path = entry.path()
            .strip_prefix(destination_root)
            .context("Entry outside destination directory")?
            .to_string_lossy()
            .replace('\\', "/");

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", rel_path), FileOptions::default())
                .context(format!("Failed to add directory entry {}", rel_path))?;
            continue;
        }

        zip.start_file(rel_path.as_str(), compression_options(entry.path()))
            .context(format!("Failed to start file entry for {}", rel_path))?;
        let mut reader = fs::File::open(entry.path())
            .context(format!("Failed to open {}", entry.path().display()))?;
        let bytes = io::copy(&mut reader, &mut zip)
            .context(format!("Failed to write to zip for {}", rel_path))?;

        debug!("Compressed {} ({} bytes)", rel_path, bytes);
        file_count += 1;
    }

    zip.finish().context("Failed to finalize zip file")?;
    debug!("Archived {} files to {} in {:?}", file_count, zip_path.display(), start.elapsed());
    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_file_structure;
    use std::io::Read;
    use zip::read::ZipArchive;

    #[test]
    fn test_archive_path_is_sibling() {
        let path = archive_path_for(Path::new("/out/20240101_120000")).unwrap();
        assert_eq!(path, Path::new("/out/20240101_120000.zip"));
    }

    #[test]
    fn test_archive_contains_tree() {
        let temp_dir = create_test_file_structure().unwrap();
        let root = temp_dir.path().join("run");
        fs::create_dir_all(&root).unwrap();
        for name in ["dir1", "dir2", "empty"] {
            fs::rename(temp_dir.path().join(name), root.join(name)).unwrap();
        }

        let zip_path = archive_destination(&root).unwrap();
        assert_eq!(zip_path, temp_dir.path().join("run.zip"));

        let mut archive = ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(names.contains(&"dir1/subdir1/file4.txt".to_string()));
        assert!(names.contains(&"empty/".to_string()));

        let mut content = String::new();
        archive.by_name("dir1/file3.txt").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "Test content 3");
    }

    #[test]
    fn test_compressed_formats_are_stored() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let root = temp_dir.path().join("run");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("Checklist_20240101_120000.XLSX"), b"PK placeholder").unwrap();
        fs::write(root.join("collector.log"), b"log line\n".repeat(50)).unwrap();

        let zip_path = archive_destination(&root).unwrap();
        let mut archive = ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.by_name("Checklist_20240101_120000.XLSX").unwrap().compression(), CompressionMethod::Stored);
        assert_eq!(archive.by_name("collector.log").unwrap().compression(), CompressionMethod::Deflated);
    }
}
