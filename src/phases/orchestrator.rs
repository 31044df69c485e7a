//! Orchestrator for a complete bundle build
//!
//! Runs every stage in order against one [`BuildConfig`]. The first failing
//! stage ends the run; whatever earlier stages wrote stays on disk.

use std::path::PathBuf;

use log::{info, warn};

use super::{archive, extract, fetch, readme, stage};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::git::{self, RepoMetadata};
use crate::layout::BuildLayout;
use crate::manifest;
use crate::runner::CommandRunner;

/// What a successful build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub metadata: RepoMetadata,
    pub layout: BuildLayout,
    /// Destination of every staged `[root]` entry
    pub staged: Vec<PathBuf>,
    pub bundle: fetch::FetchedArchive,
    pub libraries: extract::ExtractReport,
    /// `unzip -l` output for the finished zip
    pub listing: String,
}

/// Execute the complete build:
/// 1. Read the manifest
/// 2. Resolve repository metadata
/// 3. Create the build tree
/// 4. Stage root files
/// 5. Fetch the library bundle (cache or download)
/// 6. Extract requested libraries
/// 7. Write the README
/// 8. Zip and list the bundle
pub fn execute(config: &BuildConfig, runner: &dyn CommandRunner) -> Result<BuildReport> {
    let manifest = manifest::from_file(&config.manifest_path)?;

    let metadata = git::resolve_metadata(runner, &config.project_dir)?;
    info!("building bundle {}", metadata.bundle_stem());

    let layout = BuildLayout::new(config, &metadata);
    layout.create()?;

    let staged = stage::execute(&config.project_dir, &manifest.root, &layout.platform_dir)?;

    let bundle_url = manifest
        .bundle_url(&config.bundle_key)
        .ok_or_else(|| Error::MissingBundleUrl {
            key: config.bundle_key.clone(),
        })?;
    let bundle = fetch::execute(runner, &layout.cache_dir, bundle_url, config.refresh)?;

    let libraries = extract::execute(&bundle.path, &layout.lib_dir, &manifest.libraries)?;
    for name in &libraries.unmatched {
        warn!("library '{}' not found in {}", name, bundle.path.display());
    }
    if config.strict_libraries && !libraries.unmatched.is_empty() {
        return Err(Error::UnmatchedLibraries {
            names: libraries.unmatched.clone(),
        });
    }

    readme::execute(
        &readme::ReadmeContext {
            repo_name: &metadata.name,
            platform_dir: &config.platform_dir,
            guide_link: manifest.guide_link.as_deref(),
            bundle_url: Some(bundle_url),
            commit: &metadata.commit,
            remote_url: &metadata.remote_url,
        },
        &layout.readme,
    )?;

    let listing = archive::execute(runner, &layout.bundle_root, &layout.zip)?;

    Ok(BuildReport {
        metadata,
        layout,
        staged,
        bundle,
        libraries,
        listing,
    })
}
