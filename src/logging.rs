//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while it runs, so events go to a log file.
//! Filter priority: `MOVIE_EXPLORER_LOG`, then `RUST_LOG`, then `--verbose`
//! (debug), then the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "MOVIE_EXPLORER_LOG";

/// Install the global subscriber. Without a usable log file nothing is
/// installed and events are dropped.
pub fn init(log_path: Option<&Path>, level: &str, verbose: bool) {
    let Some(path) = log_path else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(level, verbose))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(level: &str, verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directive = if verbose { "debug" } else { level };
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_verbose_is_debug() {
        // Only meaningful when neither env var is set
        if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
            let filter = build_env_filter("warn", true);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        }
    }

    #[test]
    fn test_configured_level_used() {
        if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
            let filter = build_env_filter("warn", false);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        }
    }

    #[test]
    fn test_init_without_path_is_noop() {
        init(None, "info", false);
    }
}
