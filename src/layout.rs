//! # Build Tree Layout
//!
//! The fixed directory structure a bundle is assembled in:
//!
//! ```text
//! build/
//! ├── <repo>-<commit>.zip
//! └── <repo>/
//!     ├── README.txt
//!     └── CircuitPython 10.x/
//!         ├── <staged root files>
//!         └── lib/
//!             └── <extracted libraries>
//! ```

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::git::RepoMetadata;

/// Resolved paths of one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub build_dir: PathBuf,
    /// `build/<repo>`, the directory that gets zipped
    pub bundle_root: PathBuf,
    pub platform_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub readme: PathBuf,
    pub zip: PathBuf,
    pub cache_dir: PathBuf,
}

impl BuildLayout {
    pub fn new(config: &BuildConfig, metadata: &RepoMetadata) -> Self {
        let bundle_root = config.build_dir.join(&metadata.name);
        let platform_dir = bundle_root.join(&config.platform_dir);
        Self {
            build_dir: config.build_dir.clone(),
            lib_dir: platform_dir.join("lib"),
            readme: bundle_root.join("README.txt"),
            zip: config
                .build_dir
                .join(format!("{}.zip", metadata.bundle_stem())),
            cache_dir: config.cache_dir.clone(),
            platform_dir,
            bundle_root,
        }
    }

    /// Create every directory of the tree plus the cache directory.
    /// Existing directories are left as they are.
    pub fn create(&self) -> Result<()> {
        for dir in [&self.cache_dir, &self.bundle_root, &self.platform_dir, &self.lib_dir] {
            if !dir.is_dir() {
                debug!("creating {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn metadata() -> RepoMetadata {
        RepoMetadata {
            remote_url: "https://github.com/org/demo".to_string(),
            name: "demo".to_string(),
            commit: "abc1234".to_string(),
        }
    }

    #[test]
    fn test_layout_paths() {
        let config = BuildConfig::new("/work/demo").with_cache_dir("/cache");
        let layout = BuildLayout::new(&config, &metadata());
        assert_eq!(layout.bundle_root, PathBuf::from("/work/demo/build/demo"));
        assert_eq!(
            layout.platform_dir,
            PathBuf::from("/work/demo/build/demo/CircuitPython 10.x")
        );
        assert_eq!(
            layout.lib_dir,
            PathBuf::from("/work/demo/build/demo/CircuitPython 10.x/lib")
        );
        assert_eq!(
            layout.readme,
            PathBuf::from("/work/demo/build/demo/README.txt")
        );
        assert_eq!(
            layout.zip,
            PathBuf::from("/work/demo/build/demo-abc1234.zip")
        );
    }

    #[test]
    fn test_create_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::new(temp.path()).with_cache_dir(temp.path().join("cache"));
        let layout = BuildLayout::new(&config, &metadata());

        layout.create().unwrap();
        fs::write(layout.lib_dir.join("keep.mpy"), b"x").unwrap();
        layout.create().unwrap();

        assert!(layout.cache_dir.is_dir());
        assert!(layout.lib_dir.join("keep.mpy").is_file());
    }
}
