use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// RUST_LOG wins over the verbosity flag.
fn run_filter(verbose: bool) -> EnvFilter {
    let directive = if verbose {
        "statement_normalizer=debug,info"
    } else {
        "statement_normalizer=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Compact lines on stderr. Stdout is reserved for the run result.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(run_filter(verbose))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();
}

/// JSON lines on stderr, for runs driven by another process.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(run_filter(verbose))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(run_filter(true).to_string().contains("statement_normalizer=debug"));
        assert!(run_filter(false).to_string().contains("statement_normalizer=info"));
    }
}
