use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered by `ORTENSOR_LOG`.
///
/// A subscriber installed earlier by the host process takes precedence.
pub(crate) fn init() {
    let filter = EnvFilter::try_new(ortensor::env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ortensor::env::log_ansi())
        .with_writer(std::io::stderr)
        .try_init();
}
