//! crates/eval/src/output/color.rs
//! `LS_COLORS`-style color table.

use rustix::fs::Stat;
use std::env;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use walk::FileKind;

/// Environment variable holding the color database.
pub const LS_COLORS_ENV: &str = "LS_COLORS";

/// SGR sequences used when coloring paths and error messages.
///
/// Each field holds the parameter part of an escape sequence (for example
/// `01;34`); `None` leaves that kind of entry uncolored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColorTable {
    file: Option<String>,
    dir: Option<String>,
    link: Option<String>,
    exec: Option<String>,
    pipe: Option<String>,
    socket: Option<String>,
    block: Option<String>,
    chardev: Option<String>,
    error: Option<String>,
    extensions: Vec<(Vec<u8>, String)>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            file: None,
            dir: Some("01;34".into()),
            link: Some("01;36".into()),
            exec: Some("01;32".into()),
            pipe: Some("40;33".into()),
            socket: Some("01;35".into()),
            block: Some("40;33;01".into()),
            chardev: Some("40;33;01".into()),
            error: Some("01;31".into()),
            extensions: Vec::new(),
        }
    }
}

impl ColorTable {
    /// Parses an `LS_COLORS` value on top of the defaults.
    ///
    /// The value is a `:`-separated list of `key=sgr` pairs. Recognised keys
    /// are `fi`, `di`, `ln`, `ex`, `pi`, `so`, `bd`, `cd`, `er` and `*suffix`
    /// rules; unknown keys and malformed pairs are ignored. An empty SGR value
    /// disables coloring for that key.
    #[must_use]
    pub fn parse(ls_colors: &str) -> Self {
        let mut table = Self::default();
        for pair in ls_colors.split(':') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = (!value.is_empty()).then(|| value.to_owned());
            if let Some(suffix) = key.strip_prefix('*') {
                if let Some(value) = value {
                    table.extensions.push((suffix.as_bytes().to_vec(), value));
                }
                continue;
            }
            let slot = match key {
                "fi" => &mut table.file,
                "di" => &mut table.dir,
                "ln" => &mut table.link,
                "ex" => &mut table.exec,
                "pi" => &mut table.pipe,
                "so" => &mut table.socket,
                "bd" => &mut table.block,
                "cd" => &mut table.chardev,
                "er" => &mut table.error,
                _ => continue,
            };
            *slot = value;
        }
        table
    }

    /// Reads [`LS_COLORS_ENV`], falling back to the defaults when unset.
    #[must_use]
    pub fn from_env() -> Self {
        env::var_os(LS_COLORS_ENV)
            .map_or_else(Self::default, |value| Self::parse(&value.to_string_lossy()))
    }

    /// Color for the directory part of a printed path.
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    /// Color for error messages.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Color for a basename, given the entry's kind and its metadata if known.
    ///
    /// Regular files are colored as executables when any execute bit is set,
    /// then by the longest matching suffix rule, then with the `fi` color.
    #[must_use]
    pub fn for_entry(&self, kind: FileKind, name: &OsStr, metadata: Option<&Stat>) -> Option<&str> {
        let color = match kind {
            FileKind::Directory => &self.dir,
            FileKind::Symlink => &self.link,
            FileKind::Fifo => &self.pipe,
            FileKind::Socket => &self.socket,
            FileKind::BlockDevice => &self.block,
            FileKind::CharacterDevice => &self.chardev,
            FileKind::Regular => return self.for_regular(name, metadata),
            FileKind::Other | FileKind::Error => return None,
        };
        color.as_deref()
    }

    fn for_regular(&self, name: &OsStr, metadata: Option<&Stat>) -> Option<&str> {
        let executable = metadata.is_some_and(|stat| u32::from(stat.st_mode) & 0o111 != 0);
        if executable && self.exec.is_some() {
            return self.exec.as_deref();
        }
        let name = name.as_bytes();
        self.extensions
            .iter()
            .filter(|(suffix, _)| name.ends_with(suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, color)| color.as_str())
            .or(self.file.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_color_directories_and_errors() {
        let table = ColorTable::default();
        assert_eq!(table.directory(), Some("01;34"));
        assert_eq!(table.error(), Some("01;31"));
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("plain"), None),
            None
        );
        assert_eq!(
            table.for_entry(FileKind::Symlink, OsStr::new("link"), None),
            Some("01;36")
        );
        assert_eq!(table.for_entry(FileKind::Error, OsStr::new("x"), None), None);
    }

    #[test]
    fn parse_overrides_and_adds_suffix_rules() {
        let table = ColorTable::parse("di=00;34:fi=0:*.rs=01;33:*.tar.gz=01;31:ln=:bogus:zz=1");
        assert_eq!(table.directory(), Some("00;34"));
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("main.rs"), None),
            Some("01;33")
        );
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("a.tar.gz"), None),
            Some("01;31")
        );
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("notes"), None),
            Some("0")
        );
        assert_eq!(table.for_entry(FileKind::Symlink, OsStr::new("l"), None), None);
    }

    #[test]
    fn longest_suffix_wins() {
        let table = ColorTable::parse("*.gz=01;31:*.tar.gz=01;35");
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("x.tar.gz"), None),
            Some("01;35")
        );
    }

    #[test]
    fn executable_bit_uses_exec_color() {
        let temp = tempfile::tempdir().expect("tempdir");
        let script = temp.path().join("run.sh");
        std::fs::write(&script, b"#!/bin/sh\n").expect("write");
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
                .expect("chmod");
        }
        let stat = rustix::fs::stat(script.as_path()).expect("stat");
        let table = ColorTable::parse("*.sh=01;33");
        assert_eq!(
            table.for_entry(FileKind::Regular, OsStr::new("run.sh"), Some(&stat)),
            Some("01;32")
        );
    }
}
