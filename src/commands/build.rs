//! Build command implementation
//!
//! The build command runs the whole bundle pipeline once:
//! 1. Read the manifest and resolve git metadata
//! 2. Stage project files into the build tree
//! 3. Fetch (or reuse) the library bundle and extract requested libraries
//! 4. Write the README, zip the tree and print the zip listing

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use bundle_builder::config::BuildConfig;
use bundle_builder::output::{OutputConfig, Status};
use bundle_builder::phases::fetch::FetchSource;
use bundle_builder::phases::orchestrator;
use bundle_builder::runner::SystemRunner;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the bundle manifest (relative to the project directory)
    #[arg(short, long, value_name = "PATH", env = "BUNDLE_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Build output directory (defaults to `build` in the project directory)
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Library bundle download cache
    #[arg(long, value_name = "DIR", env = "BUNDLE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Download the library bundle even if it is already cached
    #[arg(long)]
    pub refresh: bool,

    /// Fail if a manifest library is not found in the bundle
    #[arg(long)]
    pub strict_libraries: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl BuildArgs {
    /// Turn the arguments into the run's build configuration.
    fn into_config(self) -> Result<BuildConfig> {
        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let mut config = BuildConfig::new(project_dir)
            .with_refresh(self.refresh)
            .with_strict_libraries(self.strict_libraries);
        if let Some(manifest) = self.manifest {
            config = config.with_manifest(manifest);
        }
        if let Some(build_dir) = self.build_dir {
            config = config.with_build_dir(build_dir);
        }
        if let Some(cache_dir) = self.cache_dir {
            config = config.with_cache_dir(cache_dir);
        }
        Ok(config)
    }
}

/// Execute the build command
pub fn execute(args: BuildArgs, output: OutputConfig) -> Result<()> {
    let output = output.quiet(args.quiet);
    let config = args.into_config()?;

    output.print_status(
        Status::Start,
        &format!("Building bundle from {}", config.manifest_path.display()),
    );

    let report = match orchestrator::execute(&config, &SystemRunner) {
        Ok(report) => report,
        Err(e) => {
            output.print_status(Status::Failed, "Bundle build failed");
            return Err(e.into());
        }
    };

    match report.bundle.source {
        FetchSource::Cache => output.print_status(
            Status::Cached,
            &format!("Using cached {}", report.bundle.path.display()),
        ),
        FetchSource::Download => output.print_status(
            Status::Download,
            &format!("Downloaded {}", report.bundle.path.display()),
        ),
    }
    for name in &report.libraries.unmatched {
        output.print_status(
            Status::Warning,
            &format!("Library '{}' was not found in the bundle", name),
        );
    }

    if !output.quiet {
        println!("{}", report.listing);
    }
    output.print_status(
        Status::Done,
        &format!(
            "{} ({} staged, {} library files)",
            report.layout.zip.display(),
            report.staged.len(),
            report.libraries.files.len()
        ),
    );

    Ok(())
}
