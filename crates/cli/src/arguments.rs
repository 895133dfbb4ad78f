//! crates/cli/src/arguments.rs
//! Parsed command-line state and its translation into a run configuration.

use crate::command::{PROGRAM_NAME, clap_command};
use eval::{Access, ColorTable, EvalError, Expr, RunConfig};
use logging::{Subsystem, VerbosityConfig};
use std::ffi::OsString;
use tracing::level_filters::LevelFilter;

/// When to color output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Everything recognised on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) roots: Vec<OsString>,
    pub(crate) min_depth: Option<usize>,
    pub(crate) max_depth: Option<usize>,
    pub(crate) depth: bool,
    pub(crate) color: ColorChoice,
    pub(crate) verbose: u8,
    pub(crate) debug: Vec<Subsystem>,
    pub(crate) names: Vec<String>,
    pub(crate) path_globs: Vec<String>,
    pub(crate) types: Vec<String>,
    pub(crate) hidden: bool,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
    pub(crate) executable: bool,
    pub(crate) nohidden: bool,
    pub(crate) prune: bool,
    pub(crate) print: bool,
    pub(crate) print0: bool,
    pub(crate) delete: bool,
    pub(crate) quit: bool,
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    let mut strings = |id: &str| -> Vec<String> {
        matches
            .remove_many::<String>(id)
            .map(Iterator::collect)
            .unwrap_or_default()
    };
    let names = strings("name");
    let path_globs = strings("path");
    let types = strings("type");

    let color = match matches.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    };

    Ok(ParsedArgs {
        roots: matches
            .remove_many::<OsString>("paths")
            .map(Iterator::collect)
            .unwrap_or_default(),
        min_depth: matches.get_one::<usize>("mindepth").copied(),
        max_depth: matches.get_one::<usize>("maxdepth").copied(),
        depth: matches.get_flag("depth"),
        color,
        verbose: matches.get_count("verbose"),
        debug: matches
            .remove_many::<Subsystem>("debug")
            .map(Iterator::collect)
            .unwrap_or_default(),
        names,
        path_globs,
        types,
        hidden: matches.get_flag("hidden"),
        readable: matches.get_flag("readable"),
        writable: matches.get_flag("writable"),
        executable: matches.get_flag("executable"),
        nohidden: matches.get_flag("nohidden"),
        prune: matches.get_flag("prune"),
        print: matches.get_flag("print"),
        print0: matches.get_flag("print0"),
        delete: matches.get_flag("delete"),
        quit: matches.get_flag("quit"),
    })
}

impl ParsedArgs {
    /// Diagnostics requested with `-v`, with every `--debug` subsystem
    /// raised to `trace`.
    pub(crate) fn verbosity(&self) -> VerbosityConfig {
        self.debug.iter().fold(
            VerbosityConfig::from_verbose_level(self.verbose),
            |config, subsystem| config.with_subsystem(*subsystem, LevelFilter::TRACE),
        )
    }

    /// Builds the expression: `--nohidden` first, then the tests, then the
    /// actions, all joined with `-a`.
    ///
    /// Repeated `--type` codes are alternatives. Without `--print`,
    /// `--print0`, `--delete` or `--quit` an implicit `--print` is appended.
    pub(crate) fn expression(&self) -> Result<Expr, EvalError> {
        let mut parts = Vec::new();
        if self.nohidden {
            parts.push(Expr::NoHidden);
        }
        for pattern in &self.names {
            parts.push(Expr::name(pattern)?);
        }
        for pattern in &self.path_globs {
            parts.push(Expr::path(pattern)?);
        }
        let types = self
            .types
            .iter()
            .map(|code| Expr::type_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(any_type) = types.into_iter().reduce(Expr::or) {
            parts.push(any_type);
        }
        if self.hidden {
            parts.push(Expr::Hidden);
        }
        let mut access = None;
        for (requested, bits) in [
            (self.readable, Access::READ),
            (self.writable, Access::WRITE),
            (self.executable, Access::EXECUTE),
        ] {
            if requested {
                access = Some(access.map_or(bits, |held: Access| held.union(bits)));
            }
        }
        if let Some(access) = access {
            parts.push(Expr::Access(access));
        }

        for (requested, action) in [
            (self.prune, Expr::Prune),
            (self.print, Expr::Print),
            (self.print0, Expr::Print0),
            (self.delete, Expr::Delete),
            (self.quit, Expr::Quit),
        ] {
            if requested {
                parts.push(action);
            }
        }

        Ok(match Expr::all(parts) {
            Some(expr) if expr.contains_action(produces_output) => expr,
            Some(expr) => Expr::and(expr, Expr::Print),
            None => Expr::Print,
        })
    }

    /// Directories are evaluated after their contents with `--depth`, and
    /// always when deleting so that directories are emptied first.
    pub(crate) const fn post_order(&self) -> bool {
        self.depth || self.delete
    }

    pub(crate) fn into_config(self, colors: Option<ColorTable>) -> Result<RunConfig, EvalError> {
        let expr = self.expression()?;
        let mut builder = RunConfig::builder(expr)
            .roots(self.roots.iter().cloned())
            .post_order(self.post_order())
            .colors(colors);
        if let Some(depth) = self.min_depth {
            builder = builder.min_depth(depth);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }
        Ok(builder.build())
    }
}

fn produces_output(node: &Expr) -> bool {
    matches!(node, Expr::Print | Expr::Print0 | Expr::Delete | Expr::Quit)
}
