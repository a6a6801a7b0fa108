//! Tracing subscriber setup

use harbor_core::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_FILTER: &str =
    "info,harbor_api=debug,harbor_processing=debug,harbor_db=debug,tower_http=debug";

/// Keeps the file writers alive; logs still buffered are flushed on drop.
#[must_use = "dropping the guard stops file logging"]
pub struct TelemetryGuard {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Console output is always on. With `LOG_DIR` set, every event is also
/// written to `combined.log` and errors to `error.log`.
pub fn init_telemetry(config: &Config) -> Result<TelemetryGuard, anyhow::Error> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let mut guards = Vec::new();
    let file_layers = config.log_dir.as_ref().map(|dir| {
        let (combined, combined_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "combined.log"));
        let (errors, errors_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "error.log"));
        guards.push(combined_guard);
        guards.push(errors_guard);

        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(combined)
            .and_then(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(errors)
                    .with_filter(LevelFilter::ERROR),
            )
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .with(file_layers)
        .try_init()?;

    tracing::info!(
        environment = %config.environment,
        file_logging = config.log_dir.is_some(),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { _guards: guards })
}
