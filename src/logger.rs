//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the config is resolved. The level
//! string has already been checked by [`parse_level`] during config loading;
//! `RUST_LOG` may still carry full `EnvFilter` directives.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::AppError;

/// Install the global subscriber.
///
/// Precedence: with `cli_level` set (the user passed `-v` flags), `level`
/// wins over `RUST_LOG`. Otherwise `RUST_LOG` wins over the configured
/// `level`. Whichever loses is only a fallback when the winner fails to parse.
///
/// With `log_file` set, output is appended there without ANSI colours so it
/// does not interleave with the console prompt.
pub fn init(level: &str, cli_level: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = build_filter(level, cli_level)?;
    let writer = make_writer(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Parse a plain level name (`error` .. `trace`, or `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    let level = level.trim();
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level '{level}'")))
}

fn build_filter(level: &str, cli_level: bool) -> Result<EnvFilter, AppError> {
    let from_env = || EnvFilter::try_from_default_env().ok();
    let from_level = || EnvFilter::try_new(level).ok();

    let filter = if cli_level {
        from_level().or_else(from_env)
    } else {
        from_env().or_else(from_level)
    };
    filter.ok_or_else(|| {
        AppError::Logger(format!("invalid log level '{level}' and no usable RUST_LOG"))
    })
}

fn make_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter, AppError> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(std::io::stderr));
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logger(format!("failed to open log file '{}': {e}", path.display())))?;
    Ok(BoxMakeWriter::new(file))
}
