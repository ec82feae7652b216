use std::{io, path::Path};

use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt::time::SystemTime, layer::SubscriberExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file path {0:?} has no file name")]
    NoFileName(String),
    #[error("unable to open log file: {0}")]
    File(#[from] InitError),
}

/// Logging handle for one run.
///
/// Holds the subscriber and the guard of the file writer. Log lines still
/// buffered in the writer are flushed when this is dropped.
pub struct Logger {
    dispatch: Dispatch,
    _guard: WorkerGuard,
}

impl Logger {
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

/// Builds a subscriber writing to stdout and to `log_file`.
///
/// Nothing is installed globally; attach the returned dispatch to whatever
/// should log through it.
pub fn init_logger(log_file: &Path) -> Result<Logger, LoggerError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| LoggerError::NoFileName(log_file.display().to_string()))?;
    let directory = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(concat!(env!("CARGO_CRATE_NAME"), "=debug,warn")));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stdout)
                .with_timer(SystemTime)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_timer(SystemTime)
                .with_target(false),
        );

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        _guard: guard,
    })
}
