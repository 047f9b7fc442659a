use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::collectors::collector::collect_with;
use crate::config::CopyTask;
use crate::context::RunContext;
use crate::models::CollectionOutcome;

/// Copy a single file into the artifacts directory.
pub fn collect_file(task: &CopyTask, context: &RunContext) -> CollectionOutcome {
    collect_with(task, context, Path::is_file, copy_file)
}

/// Copy a directory tree into the artifacts directory.
pub fn collect_directory(task: &CopyTask, context: &RunContext) -> CollectionOutcome {
    collect_with(task, context, Path::is_dir, copy_directory)
}

/// Copy `source` to `dest`, replacing an existing file.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::copy(source, dest)
        .context(format!("Failed to copy {} to {}", source.display(), dest.display()))?;
    Ok(())
}

/// Recursively copy every file and directory under `source` into `dest`.
///
/// Missing directories are created and existing files are overwritten.
/// Symbolic links are followed.
pub fn copy_directory(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .context(format!("Failed to create directory: {}", dest.display()))?;

    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry.context(format!("Failed to read directory entry under {}", source.display()))?;
        let rel_path = entry.path().strip_prefix(source)
            .context("Directory entry outside of source tree")?;
        let target = dest.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .context(format!("Failed to create directory: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .context(format!("Failed to copy {} to {}", entry.path().display(), target.display()))?;
        }
    }

    Ok(())
}
