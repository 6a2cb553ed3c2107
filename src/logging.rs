//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/encounter-manager/encounter-manager.log` (or
//! platform equivalent) with 10 MB size-based rotation. Set `DEBUG_LOGGING=1`
//! to enable debug output for this crate.

use crate::app_state::APP_NAME;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Target for events the binary already reports on the terminal itself.
/// Written to the log file, never to stderr.
pub const STARTUP_TARGET: &str = "encounter_manager::startup";

/// Initialize logging: everything to the log file, warnings and errors to stderr
/// so they do not interleave with the REPL on stdout.
///
/// Returns a `WorkerGuard` that must be held for the application lifetime
/// to flush buffered logs on shutdown. Returns `None` when the log directory
/// cannot be used, falling back to stderr-only logging.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join(APP_NAME)) else {
        init_stderr_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // subscriber not installed yet
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join(format!("{APP_NAME}.log"));
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_SIZE),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter(false));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!(
        log_file = ?log_path,
        debug_logging,
        "encounter manager logging initialized"
    );

    Some(guard)
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,encounter_manager=debug"
    } else {
        "info"
    }
}

fn stderr_filter(debug_logging: bool) -> EnvFilter {
    let base = if debug_logging {
        filter_directive(true)
    } else {
        "warn"
    };
    EnvFilter::new(format!("{base},{STARTUP_TARGET}=off"))
}

fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(stderr_filter(debug_logging));

    tracing_subscriber::registry().with(stderr_layer).init();
}
