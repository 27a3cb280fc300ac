use crate::modules::logger::{validate_log_level, LocalTimer};
use crate::modules::settings::cli::SETTINGS;
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

pub static LOG_WORKER_GUARD: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

pub fn setup_file_logger() -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    let level = validate_log_level(&SETTINGS.keeppim_log_level);
    let with_ansi = SETTINGS.keeppim_ansi_logs;

    let (nonblocking, guard) = match decode_log_writer() {
        Some(writer) => writer,
        None => return super::setup_stdout_logger(),
    };
    let _ = LOG_WORKER_GUARD.set(vec![guard]);

    let layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(with_ansi)
        .with_level(true)
        .with_writer(nonblocking)
        .with_target(true);

    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(layer);

    tracing::subscriber::set_global_default(subscriber)
}

fn decode_log_writer() -> Option<(NonBlocking, WorkerGuard)> {
    let rolling = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("keeppim")
        .max_log_files(SETTINGS.keeppim_max_log_files)
        .build(SETTINGS.keeppim_log_dir.clone());
    match rolling {
        Ok(rolling) => Some(tracing_appender::non_blocking(rolling)),
        Err(e) => {
            eprintln!(
                "Failed to initialize rolling file appender in {:?}: {}. Falling back to stderr.",
                SETTINGS.keeppim_log_dir, e
            );
            None
        }
    }
}
