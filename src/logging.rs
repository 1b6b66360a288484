use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr so table/TSV/JSON output on
/// stdout stays clean. `RUST_LOG` wins; otherwise `verbose` selects debug.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("college_fit={level}"))
    });

    // A second install (e.g. from tests) is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
