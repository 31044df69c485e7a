//! Archive: Zip the Bundle Tree
//!
//! Compresses `build/<repo>` into `build/<repo>-<commit>.zip` with the
//! system `zip` tool, then lists the result with `unzip -l` so the run log
//! shows exactly what shipped. An existing zip of the same name is removed
//! first; `zip -r` would otherwise update it in place and keep stale entries.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// Execute the archive step and return the `unzip -l` listing.
pub fn execute(runner: &dyn CommandRunner, bundle_root: &Path, zip_path: &Path) -> Result<String> {
    let build_dir = zip_path.parent().ok_or_else(|| Error::Path {
        message: format!("{} has no parent directory", zip_path.display()),
    })?;
    let zip_name = file_name(zip_path)?;
    let root_name = file_name(bundle_root)?;

    if zip_path.exists() {
        fs::remove_file(zip_path)?;
    }

    info!("creating {}", zip_path.display());
    runner.run(
        &Invocation::new("zip")
            .args(["-r", zip_name.as_str(), root_name.as_str()])
            .current_dir(build_dir),
    )?;

    runner.run(&Invocation::new("unzip").arg("-l").arg(zip_path.to_string_lossy()))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Path {
            message: format!("{} has no file name", path.display()),
        })
}
