//! # Error Handling
//!
//! This module defines the centralized error type for `bundle-builder`. It
//! uses the `thiserror` library to describe every failure mode of the bundle
//! pipeline with a clear, descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering manifest, staging, download,
//!   extraction and external command failures.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Every variant is fatal to a build run. The only recovered failure in the
//! pipeline (a missing commit hash) never surfaces as an `Error`; it is
//! replaced by a sentinel inside the metadata resolver.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for bundle-builder operations
#[derive(Error, Debug)]
pub enum Error {
    /// The bundle manifest could not be read or is missing a required section.
    #[error("Manifest error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// A `[root]` entry is neither a regular file nor a directory.
    #[error("Root path not found: {}", path.display())]
    MissingStagedPath { path: PathBuf },

    /// The manifest does not name a library bundle URL.
    #[error("No library bundle URL configured (set `{key}` in the [library_bundle] section)")]
    MissingBundleUrl { key: String },

    /// The bundle URL could not be used to derive a cache file name.
    #[error("Invalid bundle URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// An external command exited with a non-zero status.
    #[error("Command failed ({status}): {command}{}", if stderr.is_empty() { String::new() } else { format!(" - {}", stderr) })]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("Could not run {command}: {message}")]
    CommandSpawn { command: String, message: String },

    /// An archive member would be written outside of the destination directory.
    #[error("Refusing to extract archive member outside destination: {member}")]
    UnsafeArchivePath { member: String },

    /// Requested libraries that matched nothing in the bundle (strict mode only).
    #[error("Libraries not found in bundle: {}", names.join(", "))]
    UnmatchedLibraries { names: Vec<String> },

    /// An error with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A zip archive error, wrapped from `zip::result::ZipError`.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
