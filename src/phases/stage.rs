//! Stage: Copy Project Files
//!
//! Copies every `[root]` entry of the manifest into the platform directory of
//! the build tree, in manifest order.
//!
//! ## Rules
//!
//! - A regular file is copied into the platform directory, keeping its
//!   permissions and modification time.
//! - A directory is copied recursively to `<platform dir>/<basename>`.
//! - Anything else aborts the run with [`Error::MissingStagedPath`]. Entries
//!   staged before the failure stay on disk.
//!
//! Running the stage again over an existing build tree overwrites files in
//! place.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Execute the stage: copy each root entry (relative to `project_dir`) into
/// `dest_dir`. Returns the destination path of every staged entry.
pub fn execute(project_dir: &Path, root: &[String], dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(root.len());

    for entry in root {
        let src = project_dir.join(entry);
        let name = src.file_name().ok_or_else(|| Error::Path {
            message: format!("root entry '{}' has no file name", entry),
        })?;
        let dst = dest_dir.join(name);

        if src.is_file() {
            copy_file(&src, &dst)?;
        } else if src.is_dir() {
            copy_tree(&src, &dst)?;
        } else {
            return Err(Error::MissingStagedPath {
                path: PathBuf::from(entry),
            });
        }

        info!("staged {}", entry);
        staged.push(dst);
    }

    Ok(staged)
}

/// Copy a file, carrying over permissions and modification time.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    debug!("copy {} -> {}", src.display(), dst.display());
    fs::copy(src, dst)?;

    // Set by path so read-only copies get their mtime too
    let modified = FileTime::from_last_modification_time(&fs::metadata(src)?);
    filetime::set_file_mtime(dst, modified)?;
    Ok(())
}

/// Recursively copy a directory tree, following symlinks.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(|e| Error::Path {
            message: format!("{}: {}", entry.path().display(), e),
        })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}
