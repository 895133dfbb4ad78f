//! crates/logging/src/tracing_macros.rs
//! Convenience macros for oc-find subsystem tracing.
//!
//! These macros wrap the standard tracing macros with the target of the
//! matching [`Subsystem`](crate::Subsystem).

/// Emit a traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "oc_find::walk", $($arg)*)
    };
}

/// Emit an evaluation trace.
///
/// # Example
/// ```ignore
/// trace_eval!("evaluating {} at depth {}", expr, depth);
/// ```
#[macro_export]
macro_rules! trace_eval {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "oc_find::eval", $($arg)*)
    };
}

/// Emit a deletion trace.
///
/// # Example
/// ```ignore
/// trace_del!("deleted {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_del {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "oc_find::delete", $($arg)*)
    };
}

/// Emit a metadata fetch trace.
///
/// # Example
/// ```ignore
/// trace_stat!("stat {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_stat {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "oc_find::stat", $($arg)*)
    };
}

/// Emit a run-level trace: command line, per-root progress, summary.
///
/// # Example
/// ```ignore
/// trace_run!(roots = 2, "evaluating command line");
/// ```
#[macro_export]
macro_rules! trace_run {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "oc_find::run", $($arg)*)
    };
}
