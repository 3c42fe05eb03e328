//! Log output for the binary. Everything goes to stderr so stdout stays the board.

/// Install the global subscriber, filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized");
    }
}
