use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber writing to stdout.
///
/// Falls back to `info` when `directives` cannot be parsed.
pub fn init_logging(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}
