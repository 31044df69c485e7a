//! # Output Configuration
//!
//! Controls how `bundle-builder` decorates its status lines: emoji markers
//! on capable terminals, bracketed plain-text tags everywhere else (CI logs,
//! pipes, `TERM=dumb`).
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables decoration when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables decoration
//! - `CLICOLOR_FORCE=1` - Forces decoration even in non-TTY
//! - `TERM=dumb` - Disables decoration for dumb terminals

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always`, `never` or `auto`.
    /// In auto mode decoration is disabled by `NO_COLOR`, `CLICOLOR=0`,
    /// `TERM=dumb`, or a non-TTY stdout (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self {
            use_color,
            quiet: false,
        }
    }

    /// Same configuration with quiet mode set.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Format a status line with the marker matching this configuration.
    pub fn status(&self, kind: Status, message: &str) -> String {
        let (fancy, plain) = kind.markers();
        format!("{} {}", emoji(self, fancy, plain), message)
    }

    /// Print a status line unless quiet.
    pub fn print_status(&self, kind: Status, message: &str) {
        if !self.quiet {
            println!("{}", self.status(kind, message));
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self {
            use_color: true,
            quiet: false,
        }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self {
            use_color: false,
            quiet: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kinds of status line printed during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Start,
    Cached,
    Download,
    Warning,
    Done,
    Failed,
}

impl Status {
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            Status::Start => ("📦", "[BUILD]"),
            Status::Cached => ("💾", "[CACHE]"),
            Status::Download => ("⬇️", "[FETCH]"),
            Status::Warning => ("⚠️", "[WARN]"),
            Status::Done => ("✅", "[OK]"),
            Status::Failed => ("❌", "[FAIL]"),
        }
    }
}

/// Returns `emoji_str` when decoration is enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(emoji(&config, "📦", "[BUILD]"), "[BUILD]");
    }

    #[test]
    fn test_status_plain() {
        let config = OutputConfig::without_color();
        assert_eq!(
            config.status(Status::Done, "build/demo-abc1234.zip"),
            "[OK] build/demo-abc1234.zip"
        );
    }

    #[test]
    fn test_status_fancy() {
        let config = OutputConfig::with_color();
        assert_eq!(config.status(Status::Cached, "bundle.zip"), "💾 bundle.zip");
    }

    #[test]
    fn test_quiet_flag() {
        let config = OutputConfig::from_env_and_flag("never").quiet(true);
        assert!(config.quiet);
    }
}
