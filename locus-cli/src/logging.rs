use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "LOCUS_LOG";

/// Directive used when `LOCUS_LOG` is unset or does not parse
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "locus=debug,locus_cli=debug"
    } else {
        "locus=warn,locus_cli=warn"
    }
}

/// Install the stderr subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
