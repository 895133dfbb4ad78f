//! crates/eval/src/output/mod.rs
//! The single rendering path for printed paths and error reports.

mod color;

pub use color::{ColorTable, LS_COLORS_ENV};

use rustix::fs::Stat;
use rustix::io::Errno;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use walk::WalkEntry;

const RESET: &[u8] = b"\x1b[0m";

/// Output sinks borrowed for the duration of a run.
///
/// Write failures are logged and otherwise ignored: a closed pipe must not
/// turn into an evaluation failure.
pub struct Output<'w> {
    stdout: &'w mut dyn Write,
    stderr: &'w mut dyn Write,
    errors: usize,
}

impl<'w> Output<'w> {
    /// Wraps the primary output and the diagnostic stream.
    pub fn new(stdout: &'w mut dyn Write, stderr: &'w mut dyn Write) -> Self {
        Self {
            stdout,
            stderr,
            errors: 0,
        }
    }

    /// Writes the entry's path and a newline.
    ///
    /// With colors the directory part uses the directory color and the
    /// basename the color of its type; `metadata` decides the executable
    /// color for regular files.
    pub fn print_path(
        &mut self,
        colors: Option<&ColorTable>,
        entry: &WalkEntry<'_>,
        metadata: Option<&Stat>,
    ) {
        let path = entry.path().as_os_str().as_bytes();
        let mut line = Vec::with_capacity(path.len() + 32);
        match colors {
            None => line.extend_from_slice(path),
            Some(table) => {
                let (parent, name) = path.split_at(entry.name_offset());
                paint(&mut line, table.directory(), parent);
                let color = table.for_entry(entry.kind(), entry.name(), metadata);
                paint(&mut line, color, name);
            }
        }
        line.push(b'\n');
        self.emit_stdout(&line);
    }

    /// Writes `path` followed by a NUL byte, without colors.
    pub fn print_path0(&mut self, path: &Path) {
        let path = path.as_os_str().as_bytes();
        let mut record = Vec::with_capacity(path.len() + 1);
        record.extend_from_slice(path);
        record.push(0);
        self.emit_stdout(&record);
    }

    /// Reports an OS error for `path` on the diagnostic stream.
    pub fn report_error(&mut self, colors: Option<&ColorTable>, path: &Path, errno: Errno) {
        let message = format!("'{}': {}", path.display(), describe(errno));
        self.report(colors, &message);
    }

    /// Number of errors reported so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    /// Flushes both sinks.
    pub fn flush(&mut self) {
        if let Err(error) = self.stdout.flush() {
            tracing::warn!(%error, "failed to flush standard output");
        }
        if let Err(error) = self.stderr.flush() {
            tracing::warn!(%error, "failed to flush standard error");
        }
    }

    fn report(&mut self, colors: Option<&ColorTable>, message: &str) {
        self.errors += 1;
        let mut line = Vec::with_capacity(message.len() + 16);
        paint(&mut line, colors.and_then(ColorTable::error), message.as_bytes());
        line.push(b'\n');
        if let Err(error) = self.stderr.write_all(&line) {
            tracing::warn!(%error, "failed to write error report");
        }
    }

    fn emit_stdout(&mut self, bytes: &[u8]) {
        if let Err(error) = self.stdout.write_all(bytes) {
            tracing::warn!(%error, "failed to write to standard output");
        }
    }
}

/// Appends `text`, wrapped in the SGR sequence `color` when one is given.
fn paint(line: &mut Vec<u8>, color: Option<&str>, text: &[u8]) {
    if text.is_empty() {
        return;
    }
    match color {
        Some(color) => {
            line.extend_from_slice(b"\x1b[");
            line.extend_from_slice(color.as_bytes());
            line.push(b'm');
            line.extend_from_slice(text);
            line.extend_from_slice(RESET);
        }
        None => line.extend_from_slice(text),
    }
}

/// The OS's description of `errno`, without the `(os error N)` suffix.
fn describe(errno: Errno) -> String {
    let text = io::Error::from(errno).to_string();
    match text.rfind(" (os error ") {
        Some(cut) => text[..cut].to_owned(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walk::{AtPath, FileKind, Visit};

    fn entry(path: &Path, offset: usize, kind: FileKind) -> WalkEntry<'_> {
        WalkEntry::new(path, offset, 1, kind, Visit::Pre, AtPath::cwd(path))
    }

    #[test]
    fn plain_print_is_path_and_newline() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let path = Path::new("dir/file.rs");
        let file = entry(path, 4, FileKind::Regular);
        Output::new(&mut stdout, &mut stderr).print_path(None, &file, None);
        assert_eq!(stdout, b"dir/file.rs\n");
        assert!(stderr.is_empty());
    }

    #[test]
    fn colored_print_paints_parent_and_name() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let table = ColorTable::parse("*.rs=01;33");
        let path = Path::new("dir/file.rs");
        Output::new(&mut stdout, &mut stderr).print_path(
            Some(&table),
            &entry(path, 4, FileKind::Regular),
            None,
        );
        assert_eq!(
            stdout,
            b"\x1b[01;34mdir/\x1b[0m\x1b[01;33mfile.rs\x1b[0m\n".to_vec()
        );
    }

    #[test]
    fn colored_root_has_no_parent_segment() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let table = ColorTable::default();
        let path = Path::new("plain");
        Output::new(&mut stdout, &mut stderr).print_path(
            Some(&table),
            &entry(path, 0, FileKind::Regular),
            None,
        );
        assert_eq!(stdout, b"plain\n");
    }

    #[test]
    fn print0_terminates_with_nul() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        Output::new(&mut stdout, &mut stderr).print_path0(Path::new("a b"));
        assert_eq!(stdout, b"a b\0");
    }

    #[test]
    fn errors_are_counted_and_rendered() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut output = Output::new(&mut stdout, &mut stderr);
        output.report_error(None, Path::new("gone"), Errno::NOENT);
        output.report_error(Some(&ColorTable::default()), Path::new("x"), Errno::ACCESS);
        assert_eq!(output.error_count(), 2);
        drop(output);

        let text = String::from_utf8(stderr).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("'gone': No such file or directory"));
        let colored = lines.next().expect("second report");
        assert!(colored.starts_with("\x1b[01;31m'x': "));
        assert!(colored.ends_with("\x1b[0m"));
        assert!(stdout.is_empty());
    }

    #[test]
    fn write_failures_are_swallowed() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
        }

        let mut stdout = Broken;
        let mut stderr = Broken;
        let mut output = Output::new(&mut stdout, &mut stderr);
        output.print_path0(Path::new("x"));
        output.report_error(None, Path::new("x"), Errno::IO);
        output.flush();
        assert_eq!(output.error_count(), 1);
    }
}
