use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;

use error_stack::Report;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::error::{CliError, Result};

/// Name used when `--log-file` points at a directory
const DEFAULT_LOG_FILE_NAME: &str = "fluent_builder_trace.log";

/// Verbosity of the diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "Invalid tracing level '{s}'. Valid levels are: error, warn, info, debug, trace"
            )),
        }
    }
}

impl TracingLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Whether events at `level` pass this threshold
    pub fn admits(self, level: Level) -> bool {
        let rank = match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        };
        rank <= self
    }
}

/// Drops events above the configured level
#[derive(Debug, Clone, Copy)]
pub struct LevelGate(pub TracingLevel);

impl<S> Layer<S> for LevelGate
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        self.0.admits(*metadata.level())
    }
}

/// Install the global subscriber
///
/// Without a log file, events go to stderr so stdout stays reserved for generated source. With a
/// log file, events are written through a non-blocking appender and the returned `WorkerGuard`
/// must be kept alive until the program exits.
pub fn init_tracing(level: TracingLevel, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(log_file) = log_file else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        Registry::default()
            .with(LevelGate(level))
            .with(stderr_layer)
            .try_init()
            .map_err(|e| Report::new(CliError::Logging(e.to_string())))?;
        return Ok(None);
    };

    let (directory, file_name) = split_log_path(log_file);
    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default()
        .with(LevelGate(level))
        .with(file_layer)
        .try_init()
        .map_err(|e| {
            Report::new(CliError::Logging(e.to_string()))
                .attach(format!("Log file: {}", log_file.display()))
        })?;

    Ok(Some(guard))
}

/// Directory and file name for the appender
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    if path.is_dir() {
        return (path, OsStr::new(DEFAULT_LOG_FILE_NAME));
    }
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_NAME));
    (directory, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_level_from_str() {
        assert!(matches!(
            TracingLevel::from_str("error"),
            Ok(TracingLevel::Error)
        ));
        assert!(matches!(
            TracingLevel::from_str("WARN"),
            Ok(TracingLevel::Warn)
        ));
        assert!(matches!(
            TracingLevel::from_str("info"),
            Ok(TracingLevel::Info)
        ));
        assert!(matches!(
            TracingLevel::from_str("Debug"),
            Ok(TracingLevel::Debug)
        ));
        assert!(matches!(
            TracingLevel::from_str("trace"),
            Ok(TracingLevel::Trace)
        ));

        assert!(TracingLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_tracing_level_as_str() {
        assert_eq!(TracingLevel::Error.as_str(), "error");
        assert_eq!(TracingLevel::Warn.as_str(), "warn");
        assert_eq!(TracingLevel::Info.as_str(), "info");
        assert_eq!(TracingLevel::Debug.as_str(), "debug");
        assert_eq!(TracingLevel::Trace.as_str(), "trace");
    }

    #[test]
    fn test_level_threshold() {
        assert!(TracingLevel::Warn.admits(Level::ERROR));
        assert!(TracingLevel::Warn.admits(Level::WARN));
        assert!(!TracingLevel::Warn.admits(Level::INFO));
        assert!(TracingLevel::Trace.admits(Level::TRACE));
        assert!(!TracingLevel::Error.admits(Level::WARN));
    }

    #[test]
    fn test_split_log_path() {
        let (directory, file_name) = split_log_path(Path::new("logs/run.log"));
        assert_eq!(directory, Path::new("logs"));
        assert_eq!(file_name, "run.log");

        let (directory, file_name) = split_log_path(Path::new("run.log"));
        assert_eq!(directory, Path::new("."));
        assert_eq!(file_name, "run.log");

        let temp = std::env::temp_dir();
        let (directory, file_name) = split_log_path(&temp);
        assert_eq!(directory, temp.as_path());
        assert_eq!(file_name, DEFAULT_LOG_FILE_NAME);
    }
}
