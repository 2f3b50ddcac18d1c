use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so the menu on stdout stays clean. `RUST_LOG`
/// overrides the default `warn` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
