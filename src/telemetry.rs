use tracing_subscriber::EnvFilter;

/// Installs the diagnostic log subscriber on stderr.
///
/// `RUST_LOG` wins over `level`. Calling this more than once is a no-op, so
/// binaries and tests can both call it freely.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init("debug");
        init("not a valid filter ((");
        tracing::debug!("still alive");
    }
}
