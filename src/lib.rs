//! # CircuitPython Bundle Builder Library
//!
//! This library assembles CircuitPython *project bundles*: a zip holding a
//! project's code, the third-party libraries it needs (pulled from the
//! official CircuitPython library bundle), and a README describing where
//! everything came from. It is used by the `bundle-builder` command-line
//! tool.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use bundle_builder::phases::extract::classify_member;
//!
//! let wanted: BTreeSet<String> = ["adafruit_ticks".to_string()].into();
//! let member = classify_member(
//!     "adafruit-circuitpython-bundle-10.x-mpy-20250101/lib/adafruit_ticks.mpy",
//!     &wanted,
//! )
//! .unwrap();
//! assert_eq!(member.relative_path, "adafruit_ticks.mpy");
//!
//! let manifest = bundle_builder::manifest::parse("[lib]\nadafruit_ticks\n[root]\ncode.py\n").unwrap();
//! assert_eq!(manifest.root, vec!["code.py"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: `bundle_manifest.cfg`, naming the bundle URL,
//!   guide link, libraries and project files.
//! - **Build configuration (`config`)**: per-run paths and flags, passed to
//!   every stage.
//! - **Command runner (`runner`)**: the seam through which `git`, `curl`,
//!   `zip` and `unzip` are invoked, replaceable in tests.
//! - **Repository metadata (`git`)**: remote URL, repository name and commit.
//! - **Build tree (`layout`)**: the fixed directory structure that is zipped.
//! - **Phases (`phases`)**: stage, fetch, extract, README and archive, run in
//!   order by `phases::orchestrator`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod layout;
pub mod manifest;
pub mod output;
pub mod phases;
pub mod runner;

#[cfg(test)]
mod classify_proptest;
