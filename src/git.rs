//! Repository metadata from the system `git` command

use std::path::Path;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// Commit placeholder used when `HEAD` cannot be resolved (no commits yet).
pub const NO_COMMIT: &str = "NO_COMMIT";

static SSH_GITHUB_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@github\.com:").expect("valid regex"));
static GIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.git$").expect("valid regex"));

/// Where the project code in a bundle came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMetadata {
    /// `origin` remote, normalized to an https URL
    pub remote_url: String,
    /// Basename of the repository's top-level directory
    pub name: String,
    /// Short commit hash of `HEAD`, or [`NO_COMMIT`]
    pub commit: String,
}

impl RepoMetadata {
    /// Base name shared by the bundle zip and its top-level directory suffix.
    pub fn bundle_stem(&self) -> String {
        format!("{}-{}", self.name, self.commit)
    }

    /// Whether the commit hash is the placeholder.
    pub fn has_commit(&self) -> bool {
        self.commit != NO_COMMIT
    }
}

/// Rewrite an SSH-style GitHub remote as https and drop a trailing `.git`.
///
/// `git@github.com:org/repo.git` becomes `https://github.com/org/repo`.
pub fn normalize_remote_url(remote: &str) -> String {
    let https = SSH_GITHUB_PREFIX.replace(remote.trim(), "https://github.com/");
    GIT_SUFFIX.replace(&https, "").into_owned()
}

/// Resolve remote URL, repository name and short commit hash for the
/// repository containing `project_dir`.
///
/// A failing remote or top-level lookup is fatal. A failing commit lookup
/// yields [`NO_COMMIT`] instead.
pub fn resolve_metadata(runner: &dyn CommandRunner, project_dir: &Path) -> Result<RepoMetadata> {
    let git = |args: &[&str]| Invocation::new("git").args(args).current_dir(project_dir);

    let remote = runner.run(&git(&["config", "--get", "remote.origin.url"]))?;
    let remote_url = normalize_remote_url(&remote);

    let toplevel = runner.run(&git(&["rev-parse", "--show-toplevel"]))?;
    let name = Path::new(&toplevel)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Path {
            message: format!("cannot derive repository name from '{}'", toplevel),
        })?;

    let commit = match runner.run(&git(&["rev-parse", "--short", "HEAD"])) {
        Ok(hash) if !hash.is_empty() => hash,
        Ok(_) => NO_COMMIT.to_string(),
        Err(e) => {
            warn!("no commit found, using {}: {}", NO_COMMIT, e);
            NO_COMMIT.to_string()
        }
    };

    debug!("repository {} at {} ({})", name, commit, remote_url);
    Ok(RepoMetadata {
        remote_url,
        name,
        commit,
    })
}
