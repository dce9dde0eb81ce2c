//! Logging setup for protectcard.
//!
//! Both the content server and the CLI client log through `tracing`; this
//! module installs the subscriber once at startup.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the global subscriber.
///
/// `protectcard` logs under its own target and, while serving, under
/// `tower_http`. Both follow `verbosity`, which the CLI derives from `-q`
/// and repeated `-v`. A set `RUST_LOG` replaces the whole filter.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use protectcard::cli::Cli;
/// use protectcard::init_logging;
///
/// // `protectcard -vv serve` logs request handling at trace level.
/// let cli = Cli::parse_from(["protectcard", "-vv", "serve"]);
/// init_logging(cli.verbosity());
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!(
        "protectcard={level},tower_http={level}",
        level = verbosity.to_level_filter()
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr),
    );

    // Already installed is fine (tests, repeated calls)
    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors, routed through the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
