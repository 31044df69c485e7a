//! Fetch: Cache-or-Download the Library Bundle
//!
//! The library bundle zip is kept in a persistent cache directory keyed by
//! the file name at the end of its URL. A cached file is reused as-is: there
//! is no checksum or freshness check, so a stale archive persists until it is
//! removed or the run asks for a refresh.
//!
//! Downloads go through `curl` into `<name>.part`, which is renamed into place
//! only after curl succeeds. curl runs from the process working directory,
//! so `--output` is the same path this module checks and renames.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// Where the bundle came from in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Cache,
    Download,
}

/// Result of ensuring the bundle archive is available locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArchive {
    pub path: PathBuf,
    pub source: FetchSource,
}

/// The cache file for a bundle URL: `<cache_dir>/<last path segment>`.
pub fn cache_path(cache_dir: &Path, url: &str) -> Result<PathBuf> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let file_name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidUrl {
            url: url.to_string(),
            message: "URL does not end in a file name".to_string(),
        })?;

    Ok(cache_dir.join(file_name))
}

/// Execute the fetch: return the cached archive for `url`, downloading it
/// first when it is absent or `refresh` is set.
pub fn execute(
    runner: &dyn CommandRunner,
    cache_dir: &Path,
    url: &str,
    refresh: bool,
) -> Result<FetchedArchive> {
    let path = cache_path(cache_dir, url)?;

    if path.is_file() && !refresh {
        debug!("using cached bundle {}", path.display());
        return Ok(FetchedArchive {
            path,
            source: FetchSource::Cache,
        });
    }

    info!("downloading {}", url);
    fs::create_dir_all(cache_dir)?;
    let partial = partial_path(&path);
    runner.run(
        &Invocation::new("curl")
            .args(["--fail", "--location", "--silent", "--show-error", "--output"])
            .arg(partial.to_string_lossy())
            .arg(url),
    )?;
    fs::rename(&partial, &path)?;

    Ok(FetchedArchive {
        path,
        source: FetchSource::Download,
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
