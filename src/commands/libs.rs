//! # Libs Command Implementation
//!
//! Dry run of the extraction step: for every library named in the manifest,
//! show which members of a library bundle zip it would pull in. Nothing is
//! written. Useful for catching a misspelled library name, which the build
//! itself only warns about.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use bundle_builder::defaults;
use bundle_builder::manifest::{self, DEFAULT_MANIFEST};
use bundle_builder::phases::extract;
use bundle_builder::phases::fetch;

/// Arguments for the libs command
#[derive(Args, Debug)]
pub struct LibsArgs {
    /// Library bundle zip to inspect (defaults to the cached bundle for the
    /// manifest's URL)
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Path to the bundle manifest
    #[arg(short, long, value_name = "PATH", env = "BUNDLE_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Library bundle download cache
    #[arg(long, value_name = "DIR", env = "BUNDLE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show every matching member, not just counts
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the `libs` command.
pub fn execute(args: LibsArgs) -> Result<()> {
    let manifest_path = args
        .manifest
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
    let manifest = manifest::from_file(&manifest_path)?;

    let archive = match args.archive {
        Some(path) => path,
        None => {
            let Some(url) = manifest.bundle_url(defaults::BUNDLE_KEY) else {
                bail!(
                    "No bundle archive given and {} has no {} bundle URL",
                    manifest_path.display(),
                    defaults::BUNDLE_KEY
                );
            };
            let cache_dir = args.cache_dir.unwrap_or_else(defaults::default_cache_dir);
            let cached = fetch::cache_path(&cache_dir, url)?;
            if !cached.is_file() {
                bail!(
                    "Bundle is not cached yet: {} (run `bundle-builder build` first or pass ARCHIVE)",
                    cached.display()
                );
            }
            cached
        }
    };

    let members = extract::scan(&archive, &manifest.libraries)
        .with_context(|| format!("Failed to read {}", archive.display()))?;

    let mut by_library: BTreeMap<&str, Vec<&str>> = manifest
        .libraries
        .iter()
        .map(|name| (name.as_str(), Vec::new()))
        .collect();
    for member in &members {
        if let Some(list) = by_library.get_mut(member.name.as_str()) {
            list.push(member.relative_path.as_str());
        }
    }

    println!("Libraries in {}:\n", archive.display());
    let mut missing = 0;
    for (name, paths) in &by_library {
        if paths.is_empty() {
            missing += 1;
            println!("  {:<40} NOT FOUND", name);
            continue;
        }
        println!("  {:<40} {} file(s)", name, paths.len());
        if args.verbose {
            for path in paths {
                println!("      {}", path);
            }
        }
    }
    println!(
        "\nTotal: {} libraries, {} not found",
        by_library.len(),
        missing
    );

    Ok(())
}
