#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of oc-find. It parses the arguments,
//! builds the expression and [`RunConfig`](eval::RunConfig) the engine
//! needs, initialises diagnostics and runs the search against the supplied
//! output streams.
//!
//! # Design
//!
//! The command line is flat: roots are positional, tests and actions are
//! long options. Tests are joined with `-a` in a fixed order (`--nohidden`
//! first, then `--name`, `--path`, `--type`, `--hidden` and the access
//! tests), followed by the actions. Several `--type` codes are alternatives.
//! An implicit `--print` is added when no action that produces output or
//! ends the run was given.
//!
//! # Exit status
//!
//! [`run`] returns 0 when every root was walked without a reported error and
//! 1 otherwise, including for usage errors. `--help` and `--version` exit 0.
//!
//! # Examples
//!
//! ```
//! use std::ffi::OsString;
//!
//! let temp = tempfile::Builder::new().prefix("doc-").tempdir().unwrap();
//! std::fs::write(temp.path().join("notes.txt"), b"").unwrap();
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let arguments: Vec<OsString> = vec![
//!     "oc-find".into(),
//!     temp.path().into(),
//!     "--name".into(),
//!     "*.txt".into(),
//!     "--color".into(),
//!     "never".into(),
//! ];
//! let status = cli::run(arguments, &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().ends_with("notes.txt\n"));
//! ```

mod arguments;
mod command;

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};

use arguments::{ColorChoice, ParsedArgs, parse_args};
use eval::{ColorTable, Output, eval_cmdline};
use logging::init_tracing;

pub use command::PROGRAM_NAME;

/// Runs oc-find with `arguments`, the first of which is the program name.
///
/// Results go to `stdout`; error reports, usage errors and diagnostics go to
/// `stderr`. Returns the process exit status.
pub fn run<I, S, Out, Diag>(arguments: I, stdout: &mut Out, stderr: &mut Diag) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Diag: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let (sink, status): (&mut dyn Write, i32) = if error.use_stderr() {
                (stderr, 1)
            } else {
                (stdout, 0)
            };
            if let Err(write_error) = write!(sink, "{error}") {
                tracing::warn!(error = %write_error, "failed to write usage message");
            }
            status
        }
    }
}

fn execute<Out, Diag>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Diag) -> i32
where
    Out: Write,
    Diag: Write,
{
    init_tracing(&parsed.verbosity());

    let colors = match parsed.color {
        ColorChoice::Always => Some(ColorTable::from_env()),
        ColorChoice::Auto if io::stdout().is_terminal() => Some(ColorTable::from_env()),
        ColorChoice::Auto | ColorChoice::Never => None,
    };

    let config = match parsed.into_config(colors) {
        Ok(config) => config,
        Err(error) => {
            if let Err(write_error) = writeln!(stderr, "{PROGRAM_NAME}: {error}") {
                tracing::warn!(error = %write_error, "failed to report invalid expression");
            }
            return 1;
        }
    };

    let mut output = Output::new(stdout, stderr);
    let summary = eval_cmdline(&config, &mut output);
    output.flush();
    i32::from(!summary.is_success())
}
