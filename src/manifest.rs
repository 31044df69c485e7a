//! # Bundle Manifest
//!
//! Parsing for `bundle_manifest.cfg`, the user-edited file naming which
//! CircuitPython libraries and project files go into a bundle.
//!
//! ## Format
//!
//! ```ini
//! [library_bundle]
//! 10.x = https://github.com/adafruit/Adafruit_CircuitPython_Bundle/releases/download/20250101/adafruit-circuitpython-bundle-10.x-mpy-20250101.zip
//!
//! [meta]
//! guide_link = https://adafruit-playground.com/u/someone/pages/demo
//!
//! [lib]
//! adafruit_display_text
//! adafruit_bitmap_font
//!
//! [root]
//! code.py
//! fonts
//! ```
//!
//! In `[lib]` and `[root]` only the keys matter; they may be written with or
//! without a value. Keys in `[root]` are paths and keep their case.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ini::{Ini, ParseOption};

use crate::error::{Error, Result};

/// Default manifest file name, relative to the project directory.
pub const DEFAULT_MANIFEST: &str = "bundle_manifest.cfg";

const SECTION_BUNDLE: &str = "library_bundle";
const SECTION_META: &str = "meta";
const SECTION_LIB: &str = "lib";
const SECTION_ROOT: &str = "root";
const KEY_GUIDE_LINK: &str = "guide_link";

/// The parsed contents of a bundle manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Library bundle URLs keyed by CircuitPython version (`10.x`).
    pub bundles: BTreeMap<String, String>,
    /// Link to the guide describing the project.
    pub guide_link: Option<String>,
    /// Names of the libraries to extract from the bundle.
    pub libraries: BTreeSet<String>,
    /// Files and directories to stage, in manifest order.
    pub root: Vec<String>,
}

impl Manifest {
    /// The bundle URL configured for a CircuitPython version key, if any.
    pub fn bundle_url(&self, key: &str) -> Option<&str> {
        self.bundles.get(key).map(String::as_str)
    }
}

/// Parse a manifest from its text.
pub fn parse(content: &str) -> Result<Manifest> {
    let normalized = normalize_bare_keys(content);
    let option = ParseOption {
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(&normalized, option).map_err(|e| Error::ManifestParse {
        message: e.to_string(),
        hint: None,
    })?;

    let bundles = ini
        .section(Some(SECTION_BUNDLE))
        .map(|props| {
            props
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.to_string(), v.trim().to_string()))
                .collect()
        })
        .unwrap_or_default();

    let guide_link = ini
        .get_from(Some(SECTION_META), KEY_GUIDE_LINK)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let libraries = required_keys(&ini, SECTION_LIB)?.into_iter().collect();
    let root = required_keys(&ini, SECTION_ROOT)?;

    Ok(Manifest {
        bundles,
        guide_link,
        libraries,
        root,
    })
}

/// Read and parse a manifest file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::ManifestParse {
        message: format!("could not read {}: {}", path.display(), e),
        hint: Some(format!(
            "run from the project directory or pass --manifest (expected {})",
            DEFAULT_MANIFEST
        )),
    })?;
    parse(&content)
}

/// Keys of a section that must be present, deduplicated in first-seen order.
fn required_keys(ini: &Ini, section: &str) -> Result<Vec<String>> {
    let props = ini.section(Some(section)).ok_or_else(|| Error::ManifestParse {
        message: format!("missing [{}] section", section),
        hint: Some(format!(
            "add an empty [{}] section if the bundle needs no entries",
            section
        )),
    })?;

    let mut keys: Vec<String> = Vec::new();
    for (key, _) in props.iter() {
        let key = key.trim();
        if !key.is_empty() && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    Ok(keys)
}

/// Rewrite value-less keys (`code.py`) as `code.py =` so the ini parser
/// accepts them.
///
/// Indented lines are continuations of the previous value and pass through
/// untouched; they never become keys of their own.
fn normalize_bare_keys(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 64);
    for line in content.lines() {
        if line.starts_with([' ', '\t']) {
            out.push_str(line);
            out.push('\n');
            continue;
        }
        let trimmed = line.trim_end();
        let is_bare_key = !trimmed.is_empty()
            && !trimmed.starts_with(['#', ';', '['])
            && !trimmed.contains(['=', ':']);
        out.push_str(trimmed);
        if is_bare_key {
            out.push_str(" =");
        }
        out.push('\n');
    }
    out
}
