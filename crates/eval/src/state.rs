use crate::config::RunConfig;
use crate::output::Output;
use logging::trace_stat;
use rustix::fs::{AtFlags, Stat, statat};
use rustix::io::Errno;
use std::fmt;
use walk::{WalkAction, WalkEntry};

/// Per-visit evaluation state.
///
/// Borrows the entry, the run configuration and the output sinks for one
/// walker callback, carries the verdict the callback will return, and owns
/// the metadata buffer filled on first demand.
pub struct EvalState<'a, 'w> {
    entry: &'a WalkEntry<'a>,
    config: &'a RunConfig,
    output: &'a mut Output<'w>,
    action: WalkAction,
    statbuf: Option<Result<Stat, Errno>>,
}

impl<'a, 'w> EvalState<'a, 'w> {
    /// Starts a visit with the verdict [`WalkAction::Continue`].
    pub fn new(
        entry: &'a WalkEntry<'a>,
        config: &'a RunConfig,
        output: &'a mut Output<'w>,
    ) -> Self {
        Self {
            entry,
            config,
            output,
            action: WalkAction::Continue,
            statbuf: None,
        }
    }

    /// Entry being visited.
    #[must_use]
    pub const fn entry(&self) -> &'a WalkEntry<'a> {
        self.entry
    }

    /// Verdict so far.
    #[must_use]
    pub const fn action(&self) -> WalkAction {
        self.action
    }

    /// Raises the verdict to `action` unless a stronger one is already set.
    pub fn request(&mut self, action: WalkAction) {
        self.action = self.action.max(action);
    }

    /// Metadata for the entry, fetched with `lstat` semantics on first use.
    ///
    /// Metadata supplied by the walker is returned as is. A failed fetch is
    /// reported once and yields `None` for the rest of the visit.
    pub fn metadata(&mut self) -> Option<&Stat> {
        if let Some(stat) = self.entry.metadata() {
            return Some(stat);
        }
        self.fill_statbuf();
        self.statbuf.as_ref().and_then(|result| result.as_ref().ok())
    }

    /// Reports `errno` for the current entry through the run's output.
    pub fn report_error(&mut self, errno: Errno) {
        self.output
            .report_error(self.config.colors(), self.entry.path(), errno);
    }

    pub(crate) fn print(&mut self) {
        let colors = self.config.colors();
        if colors.is_some() {
            self.fill_statbuf();
        }
        let metadata = self
            .entry
            .metadata()
            .or_else(|| self.statbuf.as_ref().and_then(|result| result.as_ref().ok()));
        self.output.print_path(colors, self.entry, metadata);
    }

    pub(crate) fn print0(&mut self) {
        self.output.print_path0(self.entry.path());
    }

    fn fill_statbuf(&mut self) {
        if self.entry.metadata().is_some() || self.statbuf.is_some() {
            return;
        }
        let at = self.entry.at();
        let result = statat(at.dir(), at.path(), AtFlags::SYMLINK_NOFOLLOW);
        trace_stat!(path = ?self.entry.path(), ok = result.is_ok(), "fetched metadata");
        if let Err(errno) = result {
            self.report_error(errno);
        }
        self.statbuf = Some(result);
    }
}

impl fmt::Debug for EvalState<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalState")
            .field("entry", self.entry)
            .field("action", &self.action)
            .field("statbuf", &self.statbuf.as_ref().map(Result::is_ok))
            .finish_non_exhaustive()
    }
}
