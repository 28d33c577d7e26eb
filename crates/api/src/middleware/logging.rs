//! Logging initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Default filter directives: the configured level for this service, with
/// the chattier dependencies capped.
fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn,hyper=warn,tower_http=info")
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Request completion is logged
/// explicitly by the request-id middleware, so span lifecycle events stay
/// off here.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(fmt::layer().json().flatten_event(true).with_target(true))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(false))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cap_noisy_targets() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("sqlx=warn"));
        assert!(directives.contains("hyper=warn"));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        assert!(default_directives("info").parse::<EnvFilter>().is_ok());
        assert!(default_directives("warn").parse::<EnvFilter>().is_ok());
    }
}
