//! Inference of the directory-descriptor budget handed to the walker.

use rustix::process::{Resource, getrlimit};

/// Budget assumed when the descriptor limit is unlimited.
pub const DEFAULT_OPEN_FD_BUDGET: usize = 4096;

/// Descriptors kept back for stdin, stdout and stderr.
const STANDARD_STREAMS: usize = 3;

/// Derives the budget from a soft `RLIMIT_NOFILE` value (`None` = unlimited).
///
/// Values above three lose three descriptors to the standard streams; smaller
/// values are returned unchanged.
#[must_use]
pub fn budget_from_soft_limit(soft_limit: Option<u64>) -> usize {
    let limit = soft_limit.map_or(DEFAULT_OPEN_FD_BUDGET, |limit| {
        usize::try_from(limit).unwrap_or(usize::MAX)
    });
    if limit > STANDARD_STREAMS {
        limit - STANDARD_STREAMS
    } else {
        limit
    }
}

/// Reads the process's soft descriptor limit and derives the walker budget.
#[must_use]
pub fn infer_open_fd_budget() -> usize {
    let limit = getrlimit(Resource::Nofile);
    budget_from_soft_limit(limit.current)
}
