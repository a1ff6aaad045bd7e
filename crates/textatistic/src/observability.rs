//! Logging setup: stderr always, plus a log file when one is configured.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_PATH_ENV: &str = "TEXTATISTIC_LOG_PATH";
const LOG_DIR_ENV: &str = "TEXTATISTIC_LOG_DIR";
const LOG_FILE_PREFIX: &str = "textatistic.log";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Stderr only.
    #[default]
    None,
    /// A single file, never rotated.
    File(PathBuf),
    /// Daily rolling files in a directory.
    Dir(PathBuf),
}

/// Resolved logging destinations.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File log destination.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve from the environment, falling back to the configured directory.
    ///
    /// `TEXTATISTIC_LOG_PATH` wins over `TEXTATISTIC_LOG_DIR`, which wins over
    /// `config_log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let env_path = std::env::var_os(LOG_PATH_ENV).filter(|v| !v.is_empty());
        let env_dir = std::env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty());
        Self::resolve(env_path.map(PathBuf::from), env_dir.map(PathBuf::from), config_log_dir)
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let target = match (env_path, env_dir.or(config_dir)) {
            (Some(path), _) => LogTarget::File(path),
            (None, Some(dir)) => LogTarget::Dir(dir),
            (None, None) => LogTarget::None,
        };
        Self { target }
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins; otherwise `-q` means errors only, each `-v` steps up from
/// debug to trace, and without flags the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(flag_level(quiet, verbose).unwrap_or(config_level))
}

const fn flag_level(quiet: bool, verbose: u8) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("debug"),
        (false, _) => Some("trace"),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let appender = match &config.target {
        LogTarget::None => None,
        LogTarget::File(path) => {
            let (dir, name) = split_log_path(path)?;
            Some(tracing_appender::rolling::never(dir, name))
        }
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            Some(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
    };
    let (writer, guard) = appender.map(tracing_appender::non_blocking).unzip();
    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}

/// Split an explicit log file path, creating its directory.
fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok((dir, PathBuf::from(name)))
}
