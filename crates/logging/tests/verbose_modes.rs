//! Integration tests for verbose mode mappings.
//!
//! These tests verify that `VerbosityConfig::from_verbose_level` maps the
//! `-v`, `-vv`, `-vvv` flags to the expected filter directives and that the
//! subsystem macros accept the same argument forms as the tracing macros.

use logging::{
    Subsystem, VerbosityConfig, trace_del, trace_eval, trace_run, trace_stat, trace_walk,
};
use tracing_subscriber::filter::LevelFilter;

// ============================================================================
// Level mapping
// ============================================================================

#[test]
fn each_verbose_level_maps_to_expected_directive() {
    let cases = [
        (0, "warn"),
        (1, "warn,oc_find=info"),
        (2, "warn,oc_find=debug"),
        (3, "warn,oc_find=trace"),
        (4, "warn,oc_find=trace"),
    ];

    for (level, expected) in cases {
        let config = VerbosityConfig::from_verbose_level(level);
        assert_eq!(config.filter_directive(), expected, "level {level}");
        assert_eq!(config.level(), level);
    }
}

#[test]
fn subsystem_override_appends_target_directive() {
    let config = VerbosityConfig::from_verbose_level(1)
        .with_subsystem(Subsystem::Walk, LevelFilter::TRACE);
    assert_eq!(
        config.filter_directive(),
        "warn,oc_find=info,oc_find::walk=trace"
    );
}

// ============================================================================
// Macro forms
// ============================================================================

#[test]
fn macros_accept_format_arguments_without_subscriber() {
    let path = std::path::Path::new("a/b");
    trace_walk!("entering {:?}", path);
    trace_eval!(depth = 3, "evaluating");
    trace_del!("deleted {}", path.display());
    trace_stat!("stat {path:?}");
    trace_run!(roots = 1, "evaluating command line");
}
