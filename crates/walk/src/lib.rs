#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic filesystem traversal that drives
//! oc-find. Instead of yielding entries through an iterator, the walker calls
//! a visitor once per traversal step and lets the visitor steer the walk: the
//! returned [`WalkAction`] decides whether a directory is descended into and
//! whether the walk continues at all.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the root, visit order (optional post-order
//!   visits for directories), eager metadata and the budget of directory
//!   descriptors the walker may keep open.
//! - [`Walker::walk`] performs a depth-first traversal. Directory contents are
//!   read in full and sorted by name before any child is visited, keeping the
//!   sequence stable regardless of the filesystem's iteration order.
//! - [`WalkEntry`] is the per-visit descriptor. It borrows the walker's path
//!   buffer and descriptor table, so it is only valid for the duration of one
//!   visitor call. Its [`AtPath`] handle lets syscalls resolve the entry
//!   relative to an open parent directory.
//!
//! # Invariants
//!
//! - Symbolic links are never followed; every metadata query uses
//!   `AT_SYMLINK_NOFOLLOW`.
//! - A directory's children are only visited when its pre-order visit returned
//!   [`WalkAction::Continue`].
//! - Post-order visits are delivered only for directories that were opened
//!   successfully, and only when post-order visits were requested.
//! - [`WalkAction::Stop`] ends the walk before any further entry is visited.
//!
//! # Errors
//!
//! A walk never aborts on an I/O failure. An entry that cannot be inspected
//! or a directory that cannot be opened or listed is delivered to the visitor
//! as a [`FileKind::Error`] entry carrying the errno, and its subtree is not
//! visited.
//!
//! # Examples
//!
//! Collect every path below a temporary directory in visit order:
//!
//! ```
//! use walk::{WalkAction, WalkBuilder, WalkOutcome};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("nested"))?;
//! fs::write(root.join("nested/more.txt"), b"data")?;
//!
//! let mut seen = Vec::new();
//! let outcome = WalkBuilder::new(&root).build().walk(|entry| {
//!     seen.push((entry.depth(), entry.name().to_os_string()));
//!     WalkAction::Continue
//! });
//!
//! assert_eq!(outcome, WalkOutcome::Completed);
//! assert_eq!(seen.len(), 3);
//! assert_eq!(seen[2].0, 2);
//! assert_eq!(seen[2].1, "more.txt");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod walker;

pub use builder::WalkBuilder;
pub use entry::{AtPath, FileKind, Visit, WalkEntry, basename_offset};
pub use walker::Walker;

/// Verdict returned by the visitor for one traversal step.
///
/// Variants are ordered by strength, so `max` combines two requests into the
/// stronger one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum WalkAction {
    /// Keep walking, descending into the entry if it is a directory.
    #[default]
    Continue,
    /// Do not descend into the entry. A no-op for non-directories.
    SkipSubtree,
    /// Stop the whole walk.
    Stop,
}

/// How a call to [`Walker::walk`] ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalkOutcome {
    /// Every reachable entry was visited.
    Completed,
    /// The visitor returned [`WalkAction::Stop`].
    Stopped,
}
