//! Extract: Copy Requested Libraries out of the Bundle
//!
//! The CircuitPython library bundle is a zip laid out as
//!
//! ```text
//! adafruit-circuitpython-bundle-10.x-mpy-20250101/
//! └── lib/
//!     ├── adafruit_ticks.mpy              single-file library
//!     └── adafruit_display_text/          package library
//!         ├── __init__.mpy
//!         └── label.mpy
//! ```
//!
//! A member belongs to library `NAME` when its path matches
//! `<any>/lib/NAME.mpy` or `<any>/lib/NAME/...` and `NAME` is one of the
//! requested names (exact, case-sensitive). Matching members are written to
//! the destination with the first two path segments removed, so the example
//! above produces `adafruit_ticks.mpy` and `adafruit_display_text/label.mpy`
//! directly under `lib/`.
//!
//! Member bytes are copied by hand rather than through the zip library's
//! extraction helpers, which would recreate the stripped prefix.
//!
//! A requested name that matches nothing produces no files and no error. It
//! is reported in [`ExtractReport::unmatched`] for the caller to act on.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use zip::ZipArchive;

use crate::error::{Error, Result};

static LIBRARY_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/]+/lib/(?:([^/]+)\.mpy$|([^/]+)/)").expect("valid regex")
});

/// An archive member that belongs to a requested library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryMember {
    /// The library the member belongs to
    pub name: String,
    /// Member path with the bundle root and `lib` segments removed
    pub relative_path: String,
}

impl LibraryMember {
    /// Directory entries end in `/` and carry no content.
    pub fn is_dir(&self) -> bool {
        self.relative_path.ends_with('/')
    }
}

/// Classify an archive member path against the requested library names.
///
/// Returns `None` for members outside `<root>/lib/`, for files that are
/// neither `.mpy` modules nor inside a package directory, and for libraries
/// that were not requested.
pub fn classify_member(member: &str, names: &BTreeSet<String>) -> Option<LibraryMember> {
    let captures = LIBRARY_MEMBER.captures(member)?;
    let name = captures.get(1).or_else(|| captures.get(2))?.as_str();
    if !names.contains(name) {
        return None;
    }

    let relative_path = member.splitn(3, '/').nth(2)?;
    Some(LibraryMember {
        name: name.to_string(),
        relative_path: relative_path.to_string(),
    })
}

/// Outcome of extracting libraries from a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Files written, in archive order
    pub files: Vec<PathBuf>,
    /// Number of files written per library
    pub matched: BTreeMap<String, usize>,
    /// Requested libraries with no member in the archive, sorted
    pub unmatched: Vec<String>,
}

/// List the members of `archive_path` that belong to requested libraries,
/// without writing anything.
pub fn scan(archive_path: &Path, names: &BTreeSet<String>) -> Result<Vec<LibraryMember>> {
    let mut archive = ZipArchive::new(fs::File::open(archive_path)?)?;
    let mut members = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if let Some(member) = classify_member(entry.name(), names) {
            members.push(member);
        }
    }
    Ok(members)
}

/// Execute the extraction of every member of `archive_path` that belongs
/// to one of `names` into `dest_dir`.
pub fn execute(
    archive_path: &Path,
    dest_dir: &Path,
    names: &BTreeSet<String>,
) -> Result<ExtractReport> {
    let mut archive = ZipArchive::new(fs::File::open(archive_path)?)?;
    let mut report = ExtractReport::default();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(member) = classify_member(entry.name(), names) else {
            continue;
        };
        seen.insert(member.name.clone());

        let target = dest_dir.join(safe_relative_path(entry.name(), &member.relative_path)?);
        if member.is_dir() || entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("extract {} -> {}", entry.name(), target.display());
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;

        *report.matched.entry(member.name).or_insert(0) += 1;
        report.files.push(target);
    }

    report.unmatched = names.difference(&seen).cloned().collect();
    info!(
        "extracted {} files for {} libraries",
        report.files.len(),
        report.matched.len()
    );
    Ok(report)
}

/// Reject relative paths that would escape the destination directory.
fn safe_relative_path(member: &str, relative: &str) -> Result<PathBuf> {
    let path = Path::new(relative);
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Ok(path.to_path_buf())
    } else {
        Err(Error::UnsafeArchivePath {
            member: member.to_string(),
        })
    }
}
