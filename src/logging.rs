//! Logging setup built on `tracing-subscriber`.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "aqi_dashboard=info";

/// Initialises the global subscriber.
///
/// Console output is filtered by `RUST_LOG` (default `aqi_dashboard=info`). When
/// `log_dir` is given, the same events are also written as JSON lines to a
/// daily-rolling `aqi-dashboard.log` in that directory; the returned guard must be
/// kept alive until exit so buffered lines are flushed.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console = fmt::layer().with_target(false).compact();

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "aqi-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().json().with_writer(writer))
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        },
    }
}
