#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostic plumbing shared by the oc-find
//! workspace. Every crate emits events through a small set of subsystem
//! macros ([`trace_walk!`], [`trace_eval!`], [`trace_del!`], [`trace_stat!`])
//! that wrap the [`tracing`] macros with a fixed target per subsystem, so
//! operators can enable one area (`OC_FIND_LOG=oc_find::delete=info`) without
//! drowning in the rest.
//!
//! # Design
//!
//! - [`Subsystem`] names each diagnostic area and owns its tracing target.
//! - [`VerbosityConfig`] maps the command-line `-v` count onto an
//!   [`EnvFilter`](tracing_subscriber::EnvFilter) directive.
//! - [`init_tracing`] installs a formatting subscriber on standard error. An
//!   explicit `OC_FIND_LOG` environment variable always wins over the
//!   verbosity-derived directive.
//!
//! # Invariants
//!
//! - Diagnostics never go to standard output; that stream belongs to the
//!   search results.
//! - Installing a subscriber twice is not an error; the first one stays.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert_eq!(config.filter_directive(), "warn,oc_find=debug");
//! assert_eq!(Subsystem::Delete.target(), "oc_find::delete");
//! ```

mod config;
mod init;
mod levels;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use init::{LOG_ENV_VAR, init_tracing};
pub use levels::Subsystem;

#[doc(hidden)]
pub use tracing;
