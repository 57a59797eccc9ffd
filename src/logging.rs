//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Events go to stderr; JSON/non-JSON formatting is selected via `Config::json`.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - The subscriber is installed as the default for the current thread only and is
//!   removed when the returned `LoggingGuard` drops.
//!
//! We refuse file logging if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use perm_copy::output as out;
use perm_copy::platform::open_log_file_secure_append;
use perm_copy::{Config, LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing::dispatcher::{self, DefaultGuard};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::{Registry, registry};

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync + 'static>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

/// Keeps the invocation's subscriber installed and the file writer flushing.
/// Field order matters: the subscriber is removed before the file worker is flushed.
pub struct LoggingGuard {
    _default: DefaultGuard,
    _file: Option<WorkerGuard>,
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> Result<EnvFilter> {
    let level_str = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    };
    Ok(EnvFilter::try_new(level_str)?)
}

fn fmt_layer<W>(json: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(false)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

/// Try to open a non-blocking file writer for logging:
/// - Refuse if any ancestor is a symlink (prints a warning and returns None)
/// - Open file for append and wrap with non_blocking
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "Refusing to enable file logging: ancestor of {} is a symlink; proceeding without file logging.",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "Error checking log path {} for symlinks: {}; proceeding without file logging.",
                path.display(),
                e
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!(
                "Failed to open log file {}: {}; logs will continue to stderr.",
                path.display(),
                e
            ));
            None
        }
    }
}

/// Install the subscriber described by `cfg` for the current invocation.
pub fn init_tracing(cfg: &Config) -> Result<LoggingGuard> {
    let env_filter = env_filter_from_level(to_level_filter(&cfg.log_level))?;

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        cfg.json,
        atty::is(atty::Stream::Stderr),
        std::io::stderr,
    )];

    let mut file_guard = None;
    if let Some(path) = cfg.log_file.as_deref()
        && let Some((writer, guard)) = maybe_open_non_blocking_writer(path)
    {
        layers.push(fmt_layer(cfg.json, false, writer));
        file_guard = Some(guard);
    }

    let subscriber = registry().with(env_filter).with(layers);
    let dispatch = tracing::Dispatch::new(subscriber);
    let default = dispatcher::set_default(&dispatch);

    Ok(LoggingGuard {
        _default: default,
        _file: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_level_shows_info_and_warnings() {
        assert_eq!(to_level_filter(&LogLevel::Normal), LevelFilter::INFO);
        assert_eq!(to_level_filter(&LogLevel::Quiet), LevelFilter::ERROR);
        assert_eq!(to_level_filter(&LogLevel::Debug), LevelFilter::TRACE);
    }

    #[test]
    fn default_config_filters_below_info() {
        let cfg = Config::default();
        let _g = init_tracing(&cfg).unwrap();
        assert!(tracing::enabled!(tracing::Level::INFO));
        assert!(!tracing::enabled!(tracing::Level::DEBUG));
    }
}
