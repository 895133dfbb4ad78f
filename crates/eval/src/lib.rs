#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `eval` is the predicate-evaluation engine of oc-find. For every entry the
//! [`walk`] crate produces, it decides whether the entry matches the
//! user's boolean [`Expr`] and runs the side effects that expression
//! contains: printing, deleting, pruning and quitting. Evaluation results
//! feed back into the walk through the [`WalkAction`](walk::WalkAction)
//! verdict returned from [`visit`].
//!
//! # Design
//!
//! - [`Expr`] is a closed tree of tests, actions and combinators built before
//!   the walk starts and never mutated while it runs. [`Expr::evaluate`] is a
//!   single exhaustive match with short-circuiting `and`/`or`.
//! - [`EvalState`] lives for exactly one visit. It borrows the entry, the
//!   [`RunConfig`] and the [`Output`] sinks, carries the verdict, and owns a
//!   lazily filled metadata buffer so an entry is stat'ed at most once.
//! - [`visit`] is the walker callback. It applies the depth bounds and the
//!   pre/post-order rules before evaluating, and turns walk errors into
//!   reports.
//! - [`eval_cmdline`] walks every root in order and summarises the run in a
//!   [`RunSummary`].
//! - [`Output`] is the single rendering path for printed paths and error
//!   reports; [`ColorTable`] supplies `LS_COLORS`-style colors.
//!
//! # Invariants
//!
//! - A verdict only escalates within a visit: continue, then skip-subtree,
//!   then stop. A prune requested after a quit leaves the stop in place.
//! - A stop ends the entire run, including roots that were not yet visited.
//! - Metadata is never fetched twice for the same visit, and a failed fetch
//!   is reported once.
//!
//! # Errors
//!
//! Building an expression can fail with [`EvalError`] when a glob pattern or
//! a type code is invalid. Evaluation itself never fails: OS errors are
//! reported through [`Output`] and counted in the [`RunSummary`].
//!
//! # Examples
//!
//! Print every `*.txt` file below a directory:
//!
//! ```
//! use eval::{Expr, Output, RunConfig, eval_cmdline};
//! use walk::FileKind;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::write(temp.path().join("notes.txt"), b"hi")?;
//! fs::write(temp.path().join("main.rs"), b"fn main() {}")?;
//!
//! let expr = Expr::and(
//!     Expr::Type(FileKind::Regular),
//!     Expr::and(Expr::name("*.txt")?, Expr::Print),
//! );
//! let config = RunConfig::builder(expr).root(temp.path()).build();
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let summary = eval_cmdline(&config, &mut Output::new(&mut stdout, &mut stderr));
//!
//! assert!(summary.is_success());
//! let printed = String::from_utf8(stdout)?;
//! assert!(printed.ends_with("notes.txt\n"));
//! assert_eq!(printed.lines().count(), 1);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod config;
mod dispatch;
mod error;
mod eval;
mod expr;
mod nopenfd;
mod output;
mod run;
mod state;

pub use config::{RunConfig, RunConfigBuilder};
pub use dispatch::visit;
pub use error::EvalError;
pub use expr::{Access, Expr, Pattern};
pub use nopenfd::{DEFAULT_OPEN_FD_BUDGET, budget_from_soft_limit, infer_open_fd_budget};
pub use output::{ColorTable, LS_COLORS_ENV, Output};
pub use run::{RunSummary, eval_cmdline};
pub use state::EvalState;
