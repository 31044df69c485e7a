//! Per-run build configuration
//!
//! A [`BuildConfig`] is constructed once per invocation, either by the CLI
//! from its arguments or directly by library users, and handed to every
//! pipeline stage. Relative paths are resolved against the project
//! directory.

use std::path::{Path, PathBuf};

use crate::defaults;
use crate::manifest::DEFAULT_MANIFEST;

/// Everything a build run needs to know besides the manifest itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Root of the project being bundled; `[root]` entries are relative to it
    pub project_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Where the bundle tree and zip are written
    pub build_dir: PathBuf,
    /// Persistent download cache for library bundles
    pub cache_dir: PathBuf,
    /// `[library_bundle]` key to use, e.g. `10.x`
    pub bundle_key: String,
    /// Name of the per-version directory inside the bundle
    pub platform_dir: String,
    /// Re-download the library bundle even if it is cached
    pub refresh: bool,
    /// Fail when a requested library matches nothing in the bundle
    pub strict_libraries: bool,
}

impl BuildConfig {
    /// Configuration with the standard layout for a project directory.
    pub fn new<P: AsRef<Path>>(project_dir: P) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        Self {
            manifest_path: project_dir.join(DEFAULT_MANIFEST),
            build_dir: project_dir.join(defaults::BUILD_DIR),
            cache_dir: defaults::default_cache_dir(),
            bundle_key: defaults::BUNDLE_KEY.to_string(),
            platform_dir: defaults::PLATFORM_DIR.to_string(),
            refresh: false,
            strict_libraries: false,
            project_dir,
        }
    }

    pub fn with_manifest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_path = self.resolve(path);
        self
    }

    pub fn with_build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = self.resolve(path);
        self
    }

    pub fn with_cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = self.resolve(path);
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_strict_libraries(mut self, strict: bool) -> Self {
        self.strict_libraries = strict;
        self
    }

    /// Resolve a path relative to the project directory.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }
}
