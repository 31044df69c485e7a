//! Default values for bundle-builder configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// CircuitPython version key looked up in the `[library_bundle]` section.
pub const BUNDLE_KEY: &str = "10.x";

/// Directory inside the bundle that holds the project for one CircuitPython
/// version.
pub const PLATFORM_DIR: &str = "CircuitPython 10.x";

/// Build output directory, relative to the project directory.
pub const BUILD_DIR: &str = "build";

/// Returns the default cache directory for downloaded library bundles.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/circuitpython` (XDG Base Directory)
/// - macOS: `~/Library/Caches/circuitpython`
/// - Windows: `{FOLDERID_LocalAppData}\circuitpython`
///
/// Falls back to `.circuitpython-cache` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--cache-dir` CLI flag or the
/// `BUNDLE_CACHE_DIR` environment variable.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".circuitpython-cache"))
        .join("circuitpython")
}
