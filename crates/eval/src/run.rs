use crate::config::RunConfig;
use crate::dispatch::visit;
use crate::nopenfd::infer_open_fd_budget;
use crate::output::Output;
use logging::{trace_run, trace_walk};
use walk::{WalkBuilder, WalkOutcome};

/// What happened during [`eval_cmdline`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Roots whose walk was started.
    pub roots_visited: usize,
    /// Whether a stop request ended the run early.
    pub stopped: bool,
    /// Errors reported through the output during the run.
    pub errors: usize,
}

impl RunSummary {
    /// True when no error was reported.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Walks every root of `config` in order, evaluating the expression for each
/// entry.
///
/// The descriptor budget is inferred once and shared by all roots. A stop
/// request ends the run without visiting the remaining roots. A root that
/// cannot be inspected is reported like any other unreadable entry and the
/// next root is walked.
pub fn eval_cmdline(config: &RunConfig, output: &mut Output<'_>) -> RunSummary {
    let budget = infer_open_fd_budget();
    trace_run!(
        expr = %config.expr(),
        roots = config.roots().len(),
        budget,
        "evaluating command line"
    );

    let mut summary = RunSummary::default();
    for root in config.roots() {
        summary.roots_visited += 1;
        let mut walker = WalkBuilder::new(root)
            .post_order(config.post_order())
            .max_open_dirs(budget)
            .build();
        if walker.walk(|entry| visit(entry, config, output)) == WalkOutcome::Stopped {
            trace_walk!(root = ?root, "run stopped");
            summary.stopped = true;
            break;
        }
    }

    summary.errors = output.error_count();
    trace_run!(?summary, "run finished");
    summary
}
