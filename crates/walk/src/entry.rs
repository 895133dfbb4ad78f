use rustix::fd::BorrowedFd;
use rustix::fs::{FileType, RawMode, Stat};
use rustix::io::Errno;
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Phase of a traversal step.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Visit {
    /// Before the directory's children are visited (the only visit of a file).
    Pre,
    /// After all of the directory's children were visited.
    Post,
}

/// Type tag of a visited entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FileKind {
    /// Regular file.
    Regular,
    /// Directory.
    Directory,
    /// Symbolic link (never followed).
    Symlink,
    /// Block device.
    BlockDevice,
    /// Character device.
    CharacterDevice,
    /// Named pipe.
    Fifo,
    /// Unix domain socket.
    Socket,
    /// Any other file type the platform reports.
    Other,
    /// The entry could not be inspected; see [`WalkEntry::error`].
    Error,
}

impl FileKind {
    /// Classifies a `st_mode` value.
    #[must_use]
    pub fn from_mode(mode: RawMode) -> Self {
        Self::from_file_type(FileType::from_raw_mode(mode)).unwrap_or(Self::Other)
    }

    /// Classifies a stat record.
    #[must_use]
    pub fn from_stat(stat: &Stat) -> Self {
        Self::from_mode(stat.st_mode as RawMode)
    }

    /// Converts a directory-entry type, returning `None` when the filesystem
    /// did not report one.
    #[must_use]
    pub fn from_file_type(file_type: FileType) -> Option<Self> {
        match file_type {
            FileType::RegularFile => Some(Self::Regular),
            FileType::Directory => Some(Self::Directory),
            FileType::Symlink => Some(Self::Symlink),
            FileType::BlockDevice => Some(Self::BlockDevice),
            FileType::CharacterDevice => Some(Self::CharacterDevice),
            FileType::Fifo => Some(Self::Fifo),
            FileType::Socket => Some(Self::Socket),
            _ => None,
        }
    }

    /// Parses the single-letter codes used by `find -type`.
    #[must_use]
    pub const fn from_type_char(code: char) -> Option<Self> {
        match code {
            'f' => Some(Self::Regular),
            'd' => Some(Self::Directory),
            'l' => Some(Self::Symlink),
            'b' => Some(Self::BlockDevice),
            'c' => Some(Self::CharacterDevice),
            'p' => Some(Self::Fifo),
            's' => Some(Self::Socket),
            _ => None,
        }
    }

    /// Returns the `find -type` letter, or `None` for kinds without one.
    #[must_use]
    pub const fn type_char(self) -> Option<char> {
        match self {
            Self::Regular => Some('f'),
            Self::Directory => Some('d'),
            Self::Symlink => Some('l'),
            Self::BlockDevice => Some('b'),
            Self::CharacterDevice => Some('c'),
            Self::Fifo => Some('p'),
            Self::Socket => Some('s'),
            Self::Other | Self::Error => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_char() {
            Some(code) => write!(f, "{code}"),
            None if *self == Self::Error => f.write_str("error"),
            None => f.write_str("other"),
        }
    }
}

/// Directory-relative lookup handle for syscalls on an entry.
///
/// `path` is resolved relative to `dir`. When the walker still holds the
/// parent directory open, `path` is just the entry's name; otherwise `dir` is
/// the working directory and `path` is the full path.
#[derive(Clone, Copy)]
pub struct AtPath<'a> {
    dir: BorrowedFd<'a>,
    path: &'a Path,
}

impl<'a> AtPath<'a> {
    /// Creates a handle resolving `path` relative to `dir`.
    #[must_use]
    pub const fn new(dir: BorrowedFd<'a>, path: &'a Path) -> Self {
        Self { dir, path }
    }

    /// Creates a handle resolving `path` relative to the working directory.
    #[must_use]
    pub const fn cwd(path: &'a Path) -> Self {
        Self::new(rustix::fs::CWD, path)
    }

    /// Directory the path is resolved against.
    #[must_use]
    pub const fn dir(&self) -> BorrowedFd<'a> {
        self.dir
    }

    /// Path relative to [`dir`](Self::dir).
    #[must_use]
    pub const fn path(&self) -> &'a Path {
        self.path
    }
}

impl fmt::Debug for AtPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtPath")
            .field("dir", &self.dir)
            .field("path", &self.path)
            .finish()
    }
}

/// Descriptor of one traversal step.
///
/// Everything is borrowed from the walker and only valid during the visitor
/// call that received it.
#[derive(Clone, Copy)]
pub struct WalkEntry<'a> {
    path: &'a Path,
    name_offset: usize,
    depth: usize,
    kind: FileKind,
    visit: Visit,
    at: AtPath<'a>,
    metadata: Option<&'a Stat>,
    error: Option<Errno>,
}

impl<'a> WalkEntry<'a> {
    /// Creates a descriptor.
    ///
    /// Walkers and tests use this to feed entries to a visitor. `name_offset`
    /// is a byte offset into `path`; it is clamped to the path length.
    #[must_use]
    pub fn new(
        path: &'a Path,
        name_offset: usize,
        depth: usize,
        kind: FileKind,
        visit: Visit,
        at: AtPath<'a>,
    ) -> Self {
        Self {
            path,
            name_offset: name_offset.min(path.as_os_str().len()),
            depth,
            kind,
            visit,
            at,
            metadata: None,
            error: None,
        }
    }

    /// Attaches metadata the walker already fetched.
    #[must_use]
    pub const fn with_metadata(mut self, metadata: Option<&'a Stat>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attaches the OS error that turned this entry into [`FileKind::Error`].
    #[must_use]
    pub const fn with_error(mut self, error: Option<Errno>) -> Self {
        self.error = error;
        self
    }

    /// Path as the walker built it from the root.
    #[must_use]
    pub const fn path(&self) -> &'a Path {
        self.path
    }

    /// Byte offset of the basename within [`path`](Self::path).
    #[must_use]
    pub const fn name_offset(&self) -> usize {
        self.name_offset
    }

    /// Basename: the path from [`name_offset`](Self::name_offset) onwards.
    #[must_use]
    pub fn name(&self) -> &'a OsStr {
        let bytes = self.path.as_os_str().as_bytes();
        OsStr::from_bytes(&bytes[self.name_offset..])
    }

    /// Depth relative to the root (the root has depth `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Type tag of the entry.
    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }

    /// Phase of this visit.
    #[must_use]
    pub const fn visit(&self) -> Visit {
        self.visit
    }

    /// Lookup handle for syscalls on the entry.
    #[must_use]
    pub const fn at(&self) -> AtPath<'a> {
        self.at
    }

    /// Metadata the walker fetched while classifying the entry, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&'a Stat> {
        self.metadata
    }

    /// Error that prevented the walker from inspecting the entry.
    #[must_use]
    pub const fn error(&self) -> Option<Errno> {
        self.error
    }

    /// Indicates whether this entry is a traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.depth == 0
    }
}

impl fmt::Debug for WalkEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkEntry")
            .field("path", &self.path)
            .field("name_offset", &self.name_offset)
            .field("depth", &self.depth)
            .field("kind", &self.kind)
            .field("visit", &self.visit)
            .field("at", &self.at)
            .field("has_metadata", &self.metadata.is_some())
            .field("error", &self.error)
            .finish()
    }
}

/// Returns the byte offset of the last component of `path`.
///
/// Trailing slashes are ignored, so `"a/b/"` yields `2`. Paths without a
/// separator, such as `"."` or `"file"`, yield `0`.
#[must_use]
pub fn basename_offset(path: &Path) -> usize {
    let bytes = path.as_os_str().as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b'/' {
        end -= 1;
    }
    bytes[..end]
        .iter()
        .rposition(|&byte| byte == b'/')
        .map_or(0, |slash| slash + 1)
}
