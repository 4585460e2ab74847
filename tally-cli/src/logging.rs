use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr subscriber. `RUST_LOG` overrides the default level;
/// stdout is reserved for JSON output.
pub fn init_logging(verbose: bool) {
    let directives = if verbose {
        "tally=debug,tally_ingest=debug"
    } else {
        "tally=info,tally_ingest=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
