//! # CLI Command Implementations
//!
//! Each subcommand of `bundle-builder` lives in its own file with:
//! - An `Args` struct derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `bundle_builder` library for the actual work.

pub mod build;
pub mod cache;
pub mod completions;
pub mod libs;
