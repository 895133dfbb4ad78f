//! crates/logging/src/config.rs
//! Verbosity configuration derived from the `-v` count.

use crate::levels::{Subsystem, TARGET_PREFIX};
use tracing_subscriber::filter::LevelFilter;

/// Verbosity requested on the command line, optionally refined per subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerbosityConfig {
    level: u8,
    overrides: Vec<(Subsystem, LevelFilter)>,
}

impl VerbosityConfig {
    /// Creates a configuration from a verbose level (number of `-v` flags).
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        Self {
            level,
            overrides: Vec::new(),
        }
    }

    /// Raises or lowers a single subsystem independently of the global level.
    #[must_use]
    pub fn with_subsystem(mut self, subsystem: Subsystem, level: LevelFilter) -> Self {
        self.overrides.retain(|(existing, _)| *existing != subsystem);
        self.overrides.push((subsystem, level));
        self
    }

    /// Returns the verbose level this configuration was built from.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Level applied to every oc-find target.
    #[must_use]
    pub const fn crate_level(&self) -> LevelFilter {
        match self.level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Renders the configuration as an `EnvFilter` directive string.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let mut directive = String::from("warn");
        if self.level > 0 {
            let level = directive_level(self.crate_level());
            directive.push_str(&format!(",{TARGET_PREFIX}={level}"));
        }
        for (subsystem, level) in &self.overrides {
            directive.push_str(&format!(",{}={}", subsystem.target(), directive_level(*level)));
        }
        directive
    }
}

fn directive_level(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::OFF => "off",
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        _ => "trace",
    }
}
