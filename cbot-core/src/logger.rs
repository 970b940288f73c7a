//! Tracing initialization: console output, optionally teed to a log file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// Console and (optional) log file share the same fmt layer format: level, target,
/// thread id, span close events. The filter comes from RUST_LOG; unset defaults to
/// `info`. Load .env (e.g. dotenvy::dotenv()) before calling this or RUST_LOG from
/// the file will not apply.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);

            use tracing_subscriber::fmt::writer::MakeWriterExt;
            let writer = io::stdout.and(file);

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true);

            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true);

            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;
        }
    }

    Ok(())
}
