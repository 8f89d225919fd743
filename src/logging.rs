//! Log setup: `tracing` events to stderr, filtered by `RUST_LOG` or `-v`

use tracing_subscriber::EnvFilter;

/// Filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,url_census=info",
        _ => "info,url_census=debug",
    }
}

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` wins over the verbosity flag. Reports go to stdout, so logs
/// never interleave with them in a pipe.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    tracing::debug!(verbosity, "logging initialized");
}
