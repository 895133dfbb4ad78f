//! crates/cli/src/command.rs
//! Clap command definition for `oc-find`.

use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser, value_parser};
use logging::Subsystem;

/// Name used in usage text and diagnostics.
pub const PROGRAM_NAME: &str = "oc-find";

pub(crate) fn clap_command() -> ClapCommand {
    ClapCommand::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search a directory tree and act on the entries that match.")
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .help("Starting points of the search (default: .).")
                .action(ArgAction::Append)
                .num_args(0..)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("mindepth")
                .long("mindepth")
                .value_name("N")
                .help("Do not evaluate entries shallower than N.")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("maxdepth")
                .long("maxdepth")
                .value_name("N")
                .help("Do not descend deeper than N.")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .short('d')
                .help("Evaluate directories after their contents.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Color printed paths and errors: auto, always or never.")
                .value_parser(["auto", "always", "never"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more detail.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("SUBSYSTEM")
                .help("Trace one subsystem in full: walk, eval, delete, stat or run.")
                .action(ArgAction::Append)
                .value_parser(value_parser!(Subsystem)),
        )
        .next_help_heading("Tests")
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("GLOB")
                .help("Basename matches GLOB.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("GLOB")
                .help("Whole path matches GLOB.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .value_name("CODE")
                .help("Entry is of type f, d, l, b, c, p or s; repeat to accept several.")
                .action(ArgAction::Append),
        )
        .arg(flag("hidden", "Basename starts with a dot."))
        .arg(flag("readable", "Entry is readable by the current user."))
        .arg(flag("writable", "Entry is writable by the current user."))
        .arg(flag("executable", "Entry is executable or searchable by the current user."))
        .next_help_heading("Actions")
        .arg(flag("nohidden", "Skip hidden entries and everything below them."))
        .arg(flag("prune", "Do not descend into matching directories."))
        .arg(flag("print", "Print matching paths, one per line (the default)."))
        .arg(flag("print0", "Print matching paths, each followed by a NUL byte."))
        .arg(flag("delete", "Delete matching entries; implies --depth."))
        .arg(flag("quit", "Stop at the first matching entry."))
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}
