//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace export inside the data directory.
pub const TRACE_FILE: &str = "delv-shell-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` from `config.trace_level`
/// followed by an OpenTelemetry layer exporting to
/// `<data_dir>/delv-shell-otlp.json`.
///
/// Any failure leaves tracing disabled. Only the first successful call in a
/// process has an effect.
///
/// ```no_run
/// use delv_shell::observability::init_tracing;
/// use delv_shell::Config;
///
/// init_tracing(&Config::default());
/// tracing::info!("tracing ready");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "delv-shell"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(config.data_dir.join(TRACE_FILE), resource);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer("delv-shell")))
        .try_init();
}
