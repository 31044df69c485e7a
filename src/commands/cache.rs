//! # Cache Command Implementation
//!
//! This module implements the `cache` subcommand for the library bundle
//! download cache. Cached bundles are never refreshed automatically, so this
//! is how a stale or broken download gets inspected and removed.
//!
//! ## Subcommands
//!
//! - **`list`**: Show cached bundle archives and their sizes
//! - **`clean`**: Delete cached bundle archives and leftover partial downloads
//! - **`path`**: Print the cache directory

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use bundle_builder::defaults;

/// Manage downloaded library bundles
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// The library bundle cache directory.
    ///
    /// If not provided, it defaults to the system's cache directory
    /// (e.g., `~/.cache/circuitpython` on Linux).
    /// Can also be set with the `BUNDLE_CACHE_DIR` environment variable.
    #[arg(long, value_name = "DIR", env = "BUNDLE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached library bundles
    List,
    /// Delete cached library bundles
    Clean(CleanArgs),
    /// Print the cache directory
    Path,
}

/// Arguments for the cache clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Show what would be deleted without actually deleting anything
    #[arg(long)]
    pub dry_run: bool,
}

/// A file in the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheEntry {
    name: String,
    size: u64,
    path: PathBuf,
    /// Left behind by an interrupted download
    partial: bool,
}

/// Execute the `cache` command.
pub fn execute(args: CacheArgs) -> Result<()> {
    let cache_dir = args.cache_dir.unwrap_or_else(defaults::default_cache_dir);
    match args.command {
        CacheSubcommand::List => execute_list(&cache_dir),
        CacheSubcommand::Clean(clean_args) => execute_clean(&cache_dir, clean_args),
        CacheSubcommand::Path => {
            println!("{}", cache_dir.display());
            Ok(())
        }
    }
}

/// Execute the `cache list` command.
fn execute_list(cache_dir: &Path) -> Result<()> {
    if !cache_dir.exists() {
        println!("Cache directory does not exist: {}", cache_dir.display());
        println!("No cached bundles found.");
        return Ok(());
    }

    let entries = scan_cache_directory(cache_dir)?;
    if entries.is_empty() {
        println!("No cached bundles found in: {}", cache_dir.display());
        return Ok(());
    }

    println!("Cached bundles in {}:\n", cache_dir.display());
    for entry in &entries {
        let marker = if entry.partial { " (partial)" } else { "" };
        println!(
            "  {:<60} {:>12}{}",
            entry.name,
            format_size(entry.size),
            marker
        );
    }
    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!(
        "\nTotal: {} cached bundles ({})",
        entries.len(),
        format_size(total)
    );
    Ok(())
}

/// Execute the `cache clean` command.
fn execute_clean(cache_dir: &Path, args: CleanArgs) -> Result<()> {
    if !cache_dir.exists() {
        println!("Cache directory does not exist: {}", cache_dir.display());
        println!("No cached bundles to clean.");
        return Ok(());
    }

    let entries = scan_cache_directory(cache_dir)?;
    if entries.is_empty() {
        println!("No cached bundles found in: {}", cache_dir.display());
        return Ok(());
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    if args.dry_run {
        println!("Would delete:");
    } else {
        println!("Deleting:");
    }
    for entry in &entries {
        println!("  {} ({})", entry.name, format_size(entry.size));
        if !args.dry_run {
            fs::remove_file(&entry.path)
                .with_context(|| format!("Failed to delete {}", entry.path.display()))?;
        }
    }

    let verb = if args.dry_run { "Would free" } else { "Freed" };
    println!("\n{} {} from {} files", verb, format_size(total), entries.len());
    Ok(())
}

/// Collect bundle archives and partial downloads, sorted by name.
fn scan_cache_directory(cache_dir: &Path) -> Result<Vec<CacheEntry>> {
    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(cache_dir)
        .with_context(|| format!("Failed to read cache directory {}", cache_dir.display()))?
    {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        let metadata = dir_entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let partial = name.ends_with(".zip.part");
        if !partial && !name.ends_with(".zip") {
            continue;
        }

        entries.push(CacheEntry {
            name,
            size: metadata.len(),
            path,
            partial,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Format a byte count as a human-readable size
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}
