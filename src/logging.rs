use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILE_PREFIX, LOG_PREVIEW_CHARS};
use crate::str_utils::ellipsize;
use std::borrow::Cow;
use std::panic;
use std::path::Path;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;

/// Installs the global subscriber: env filter, daily-rotated log file under
/// `log_dir`, and span-trace capture for `ObservedError`.
///
/// Keep the returned guard alive for the life of the process or buffered
/// lines are lost.
pub fn init_tracing(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    use tracing_subscriber::prelude::*;

    std::fs::create_dir_all(log_dir)?;

    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => DEFAULT_LOG_FILTER.into(),
    };

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(guard)
}

/// Sets up a global panic hook that logs panics through tracing before
/// handing over to the previous hook.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backtrace = std::backtrace::Backtrace::capture();

        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        error!(
            target: "panic",
            message = %message,
            location = %location,
            backtrace = %backtrace,
            "FATAL: Application panicked"
        );

        original_hook(panic_info);
    }));
}

/// One-line preview of a prompt or response body for log fields.
pub fn preview(text: &str) -> Cow<'_, str> {
    ellipsize(text, LOG_PREVIEW_CHARS)
}
