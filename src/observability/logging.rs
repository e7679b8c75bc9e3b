//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a configured level.
pub fn default_filter(level: &str, verbose: bool) -> String {
    if verbose {
        "buddha_market=debug,tower_http=debug,info".to_string()
    } else {
        format!("buddha_market={level},tower_http=info,warn")
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level, verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("warn", false), "buddha_market=warn,tower_http=info,warn");
        assert!(default_filter("info", true).starts_with("buddha_market=debug"));
        assert!(EnvFilter::try_new(default_filter("info", false)).is_ok());
    }
}
