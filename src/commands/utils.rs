/// Initialize logging
///
/// Logs go to stderr; stdout carries command results and channel responses.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

/// Render a boolean outcome for stdout
pub fn format_outcome(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
