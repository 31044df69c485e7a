//! README: Describe Where the Bundle Came From

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Placeholder rendered for a manifest value that was not set.
pub const NOT_SET: &str = "(not set)";

/// Values substituted into the README template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeContext<'a> {
    pub repo_name: &'a str,
    pub platform_dir: &'a str,
    pub guide_link: Option<&'a str>,
    pub bundle_url: Option<&'a str>,
    pub commit: &'a str,
    pub remote_url: &'a str,
}

/// Render the README text (no trailing newline).
pub fn render(ctx: &ReadmeContext<'_>) -> String {
    format!(
        "This is a CircuitPython project bundle for {repo}.\n\
         \n\
         To use this bundle, follow the guide at:\n\
         {guide}\n\
         \n\
         Libraries in '{repo}/{platform}/lib' came from:\n\
         {bundle}\n\
         \n\
         The rest of this project's code is from commit {commit} of git repo:\n\
         {remote}",
        repo = ctx.repo_name,
        platform = ctx.platform_dir,
        guide = ctx.guide_link.unwrap_or(NOT_SET),
        bundle = ctx.bundle_url.unwrap_or(NOT_SET),
        commit = ctx.commit,
        remote = ctx.remote_url,
    )
}

/// Execute the README step: render and write to `path` with a final newline.
pub fn execute(ctx: &ReadmeContext<'_>, path: &Path) -> Result<()> {
    let mut text = render(ctx);
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
