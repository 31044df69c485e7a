//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::MINIMAL);
//!     fixture.command().arg("libs").assert().failure();
//! }
//! ```

use assert_fs::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{init_git_repo, write_bundle_zip, BUNDLE_FILE, BUNDLE_URL};
    pub use super::TestFixture;
}

/// URL used by the manifest snippets below. Never fetched: tests seed the
/// cache with [`BUNDLE_FILE`] first.
pub const BUNDLE_URL: &str =
    "https://example.invalid/releases/adafruit-circuitpython-bundle-10.x-mpy-20250101.zip";

/// Cache file name for [`BUNDLE_URL`].
pub const BUNDLE_FILE: &str = "adafruit-circuitpython-bundle-10.x-mpy-20250101.zip";

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Bundle URL, one module library, one package library and two root files.
    pub const MINIMAL: &str = r#"
[library_bundle]
10.x = https://example.invalid/releases/adafruit-circuitpython-bundle-10.x-mpy-20250101.zip

[meta]
guide_link = https://learn.example.com/fruit-jam

[lib]
adafruit_ticks
adafruit_display_text

[root]
code.py
fonts
"#;

    /// Like [`MINIMAL`] with a library the bundle does not contain.
    pub const WITH_TYPO: &str = r#"
[library_bundle]
10.x = https://example.invalid/releases/adafruit-circuitpython-bundle-10.x-mpy-20250101.zip

[lib]
adafruit_ticks
adafruit_tickz

[root]
code.py
"#;

    /// Missing the `[root]` section.
    pub const NO_ROOT: &str = "[lib]\nadafruit_ticks\n";
}

/// Write a small library bundle zip to `path`.
///
/// Contains `adafruit_ticks.mpy`, the `adafruit_display_text` package, a
/// lookalike `adafruit_ticks_extra.mpy` and a file outside `lib/`.
pub fn write_bundle_zip(path: &Path) {
    use zip::write::SimpleFileOptions;

    let file = File::create(path).expect("Failed to create bundle zip");
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    let top = "adafruit-circuitpython-bundle-10.x-mpy-20250101";

    writer
        .add_directory(format!("{top}/lib/"), options)
        .expect("add lib dir");
    for (name, body) in [
        ("lib/adafruit_ticks.mpy", "ticks"),
        ("lib/adafruit_ticks_extra.mpy", "extra"),
        ("lib/adafruit_display_text/__init__.mpy", "init"),
        ("lib/adafruit_display_text/label.mpy", "label"),
        ("VERSIONS.txt", "versions"),
    ] {
        writer
            .start_file(format!("{top}/{name}"), options)
            .expect("start member");
        writer.write_all(body.as_bytes()).expect("write member");
    }
    writer.finish().expect("Failed to finish bundle zip");
}

/// Turn `dir` into a git repository with an origin remote and one commit.
///
/// Returns false when `git` is not available.
pub fn init_git_repo(dir: &Path, remote: &str) -> bool {
    let git = |args: &[&str]| {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    };
    git(&["init", "-q"])
        && git(&["config", "user.email", "test@example.com"])
        && git(&["config", "user.name", "Test"])
        && git(&["remote", "add", "origin", remote])
        && git(&["add", "-A"])
        && git(&["commit", "-q", "-m", "initial"])
}

/// A project directory plus a private bundle cache.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_manifest(manifests::MINIMAL)
///     .with_file("code.py", "print('hi')")
///     .with_cached_bundle();
///
/// fixture.command().arg("libs").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with empty `project/` and `cache/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("project")
            .create_dir_all()
            .expect("Failed to create project directory");
        temp_dir
            .child("cache")
            .create_dir_all()
            .expect("Failed to create cache directory");
        Self { temp_dir }
    }

    /// Add `bundle_manifest.cfg` with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("bundle_manifest.cfg", content)
    }

    /// Add a project file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("project")
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Put the test bundle in the cache under [`BUNDLE_FILE`].
    pub fn with_cached_bundle(self) -> Self {
        write_bundle_zip(&self.cache_dir().join(BUNDLE_FILE));
        self
    }

    /// The project directory.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// The bundle cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.temp_dir.path().join("cache")
    }

    /// Create a command running in the project directory with the fixture's
    /// cache directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bundle-builder");
        cmd.current_dir(self.path())
            .env("BUNDLE_CACHE_DIR", self.cache_dir())
            .env_remove("BUNDLE_MANIFEST")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
