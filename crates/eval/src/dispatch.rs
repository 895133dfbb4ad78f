use crate::config::RunConfig;
use crate::output::Output;
use crate::state::EvalState;
use logging::trace_eval;
use rustix::io::Errno;
use walk::{FileKind, Visit, WalkAction, WalkEntry};

/// Walker callback: evaluates the run's expression for one traversal step.
///
/// Error entries are reported and their subtree skipped without evaluation.
/// Entries at or beyond the maximum depth are never descended into. In
/// post-order mode a directory is evaluated on its post visit, unless it sits
/// at the maximum depth and will never get one. Only entries within
/// `min_depth..=max_depth` are evaluated.
pub fn visit(entry: &WalkEntry<'_>, config: &RunConfig, output: &mut Output<'_>) -> WalkAction {
    if entry.kind() == FileKind::Error {
        let errno = entry.error().unwrap_or(Errno::IO);
        output.report_error(config.colors(), entry.path(), errno);
        return WalkAction::SkipSubtree;
    }

    let mut state = EvalState::new(entry, config, output);
    let depth = entry.depth();
    if depth >= config.max_depth() {
        state.request(WalkAction::SkipSubtree);
    }

    let expected = if config.post_order()
        && entry.kind() == FileKind::Directory
        && depth < config.max_depth()
    {
        Visit::Post
    } else {
        Visit::Pre
    };

    if entry.visit() == expected && (config.min_depth()..=config.max_depth()).contains(&depth) {
        let matched = config.expr().evaluate(&mut state);
        trace_eval!(
            path = ?entry.path(),
            depth,
            matched,
            action = ?state.action(),
            "evaluated entry"
        );
    }

    state.action()
}
