//! crates/logging/src/init.rs
//! Subscriber installation for the oc-find binaries.

use crate::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an explicit `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "OC_FIND_LOG";

/// Builds the filter for `config`, preferring [`LOG_ENV_VAR`] when it parses.
pub(crate) fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()))
}

/// Installs a stderr formatting subscriber filtered by `config`.
///
/// Returns `false` when another global subscriber was already installed, in
/// which case that subscriber keeps receiving events.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(&VerbosityConfig::from_verbose_level(1));
/// logging::trace_del!("removed {}", "build/old.o");
/// ```
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_falls_back_to_verbosity_directive() {
        // The variable is not set by the test harness; the derived directive
        // must therefore be accepted by EnvFilter.
        if std::env::var_os(LOG_ENV_VAR).is_some() {
            return;
        }
        let filter = build_filter(&VerbosityConfig::from_verbose_level(2));
        assert!(filter.to_string().contains("oc_find=debug"));
    }

    #[test]
    fn second_installation_is_tolerated() {
        let config = VerbosityConfig::from_verbose_level(0);
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
