use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `POMOCLOCK_LOG` wins over `RUST_LOG`;
/// with neither set only `info` and above is shown.
pub fn init() {
    let filter = std::env::var("POMOCLOCK_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
