use crate::entry::{AtPath, FileKind, Visit, WalkEntry, basename_offset};
use crate::{WalkAction, WalkOutcome};
use logging::trace_walk;
use rustix::fd::{AsFd, BorrowedFd, OwnedFd};
use rustix::fs::{AtFlags, CWD, Dir, Mode, OFlags, Stat, openat, statat};
use rustix::io::Errno;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug)]
pub(crate) struct WalkOptions {
    pub(crate) post_order: bool,
    pub(crate) prefetch_metadata: bool,
    pub(crate) max_open_dirs: usize,
}

/// Depth-first, callback-driven traversal of one root.
///
/// Created through [`WalkBuilder`](crate::WalkBuilder). A walker can be run
/// more than once; every call to [`walk`](Self::walk) starts from the root.
pub struct Walker {
    root: PathBuf,
    options: WalkOptions,
    stack: Vec<DirectoryState>,
    open_dirs: usize,
}

impl Walker {
    pub(crate) fn new(root: PathBuf, options: WalkOptions) -> Self {
        Self {
            root,
            options,
            stack: Vec::new(),
            open_dirs: 0,
        }
    }

    /// Walks the tree, calling `visitor` once per traversal step.
    ///
    /// Directories receive a [`Visit::Pre`] call before their children and,
    /// when post-order visits were requested, a [`Visit::Post`] call after
    /// them. Children are visited in byte order of their names.
    ///
    /// An entry that cannot be inspected, or a directory that cannot be
    /// read, reaches the visitor as a [`FileKind::Error`] entry carrying the
    /// errno; the walk then moves on to the next sibling.
    pub fn walk<F>(&mut self, mut visitor: F) -> WalkOutcome
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        self.stack.clear();
        self.open_dirs = 0;
        trace_walk!(root = ?self.root, "starting walk");

        let outcome = self.walk_from_root(&mut visitor);
        self.stack.clear();
        self.open_dirs = 0;
        outcome
    }

    fn walk_from_root<F>(&mut self, visitor: &mut F) -> WalkOutcome
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        let root = self.root.clone();
        if self.visit_root(root, visitor) == WalkAction::Stop {
            return WalkOutcome::Stopped;
        }

        while let Some(top) = self.stack.last_mut() {
            let Some((name, hint)) = top.entries.next() else {
                if self.finish_directory(visitor) == WalkAction::Stop {
                    return WalkOutcome::Stopped;
                }
                continue;
            };
            if self.visit_child(&name, hint, visitor) == WalkAction::Stop {
                return WalkOutcome::Stopped;
            }
        }

        WalkOutcome::Completed
    }

    fn visit_root<F>(&mut self, root: PathBuf, visitor: &mut F) -> WalkAction
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        let name_offset = basename_offset(&root);
        let at = AtPath::cwd(&root);
        let stat = match statat(CWD, root.as_path(), AtFlags::SYMLINK_NOFOLLOW) {
            Ok(stat) => stat,
            Err(errno) => {
                trace_walk!(path = ?root, %errno, "cannot inspect root");
                let entry = WalkEntry::new(&root, name_offset, 0, FileKind::Error, Visit::Pre, at)
                    .with_error(Some(errno));
                return visitor(&entry);
            }
        };

        let kind = FileKind::from_stat(&stat);
        let entry = WalkEntry::new(&root, name_offset, 0, kind, Visit::Pre, at)
            .with_metadata(Some(&stat));
        let action = visitor(&entry);
        if action != WalkAction::Continue || kind != FileKind::Directory {
            return action;
        }

        let target = Pending {
            path: root,
            name_offset,
            depth: 0,
            stat: Some(stat),
        };
        self.enter_directory(None, target, visitor)
    }

    fn visit_child<F>(
        &mut self,
        name: &OsStr,
        hint: Option<FileKind>,
        visitor: &mut F,
    ) -> WalkAction
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        let options = self.options;
        let parent_index = self.stack.len() - 1;
        let parent = &self.stack[parent_index];
        let path = parent.path.join(name);
        let name_offset = path.as_os_str().len() - name.len();
        let depth = parent.depth + 1;

        let (action, kind, stat) = {
            let at = parent.at_child(Path::new(name), &path);
            let mut kind = hint;
            let mut stat = None;
            let mut error = None;
            if options.prefetch_metadata || kind.is_none() {
                match statat(at.dir(), at.path(), AtFlags::SYMLINK_NOFOLLOW) {
                    Ok(found) => {
                        kind = Some(FileKind::from_stat(&found));
                        stat = Some(found);
                    }
                    Err(errno) => {
                        trace_walk!(path = ?path, %errno, "cannot inspect entry");
                        error = Some(errno);
                    }
                }
            }
            let kind = if error.is_some() {
                FileKind::Error
            } else {
                kind.unwrap_or(FileKind::Other)
            };
            let entry = WalkEntry::new(&path, name_offset, depth, kind, Visit::Pre, at)
                .with_metadata(stat.as_ref())
                .with_error(error);
            (visitor(&entry), kind, stat)
        };

        if action != WalkAction::Continue || kind != FileKind::Directory {
            return action;
        }

        let target = Pending {
            path,
            name_offset,
            depth,
            stat,
        };
        self.enter_directory(Some(parent_index), target, visitor)
    }

    /// Opens and lists a directory whose pre-order visit asked to descend.
    ///
    /// On success the directory is pushed onto the stack. Failures are
    /// reported to the visitor as a second, [`FileKind::Error`] visit of the
    /// same path.
    fn enter_directory<F>(
        &mut self,
        parent_index: Option<usize>,
        target: Pending,
        visitor: &mut F,
    ) -> WalkAction
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        let name = name_at(&target.path, target.name_offset);
        let listing = {
            let at = match parent_index {
                Some(index) => self.stack[index].at_child(name, &target.path),
                None => AtPath::cwd(&target.path),
            };
            open_directory(at.dir(), at.path())
                .and_then(|fd| read_entries(&fd).map(|entries| (fd, entries)))
        };

        let (fd, entries) = match listing {
            Ok(listing) => listing,
            Err(errno) => {
                trace_walk!(path = ?target.path, %errno, "cannot read directory");
                let at = match parent_index {
                    Some(index) => self.stack[index].at_child(name, &target.path),
                    None => AtPath::cwd(&target.path),
                };
                let entry = WalkEntry::new(
                    &target.path,
                    target.name_offset,
                    target.depth,
                    FileKind::Error,
                    Visit::Pre,
                    at,
                )
                .with_error(Some(errno));
                return visitor(&entry);
            }
        };

        trace_walk!(
            path = ?target.path,
            entries = entries.len(),
            "entering directory"
        );
        self.stack.push(DirectoryState {
            path: target.path,
            name_offset: target.name_offset,
            depth: target.depth,
            fd: Some(fd),
            stat: target.stat,
            entries: entries.into_iter(),
        });
        self.open_dirs += 1;
        self.enforce_budget();
        WalkAction::Continue
    }

    /// Closes the oldest retained descriptors until the budget is met.
    ///
    /// The innermost directory always keeps its descriptor.
    fn enforce_budget(&mut self) {
        let keep = self.stack.len().saturating_sub(1);
        for state in &mut self.stack[..keep] {
            if self.open_dirs <= self.options.max_open_dirs {
                break;
            }
            if state.fd.take().is_some() {
                self.open_dirs -= 1;
                trace_walk!(path = ?state.path, "closed directory to stay within budget");
            }
        }
    }

    fn finish_directory<F>(&mut self, visitor: &mut F) -> WalkAction
    where
        F: FnMut(&WalkEntry<'_>) -> WalkAction,
    {
        let Some(mut state) = self.stack.pop() else {
            return WalkAction::Continue;
        };
        if state.fd.take().is_some() {
            self.open_dirs -= 1;
        }
        if !self.options.post_order {
            return WalkAction::Continue;
        }

        let name = name_at(&state.path, state.name_offset);
        let at = match self.stack.last() {
            Some(parent) => parent.at_child(name, &state.path),
            None => AtPath::cwd(&state.path),
        };
        let entry = WalkEntry::new(
            &state.path,
            state.name_offset,
            state.depth,
            FileKind::Directory,
            Visit::Post,
            at,
        )
        .with_metadata(state.stat.as_ref());
        visitor(&entry)
    }
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("depth", &self.stack.len())
            .field("open_dirs", &self.open_dirs)
            .finish()
    }
}

/// A directory that passed its pre-order visit and is about to be opened.
struct Pending {
    path: PathBuf,
    name_offset: usize,
    depth: usize,
    stat: Option<Stat>,
}

struct DirectoryState {
    path: PathBuf,
    name_offset: usize,
    depth: usize,
    fd: Option<OwnedFd>,
    stat: Option<Stat>,
    entries: std::vec::IntoIter<(OsString, Option<FileKind>)>,
}

impl DirectoryState {
    /// Lookup handle for a child: relative to this directory's descriptor
    /// while it is open, otherwise the child's full path.
    fn at_child<'a>(&'a self, name: &'a Path, full: &'a Path) -> AtPath<'a> {
        match self.fd.as_ref() {
            Some(fd) => AtPath::new(fd.as_fd(), name),
            None => AtPath::cwd(full),
        }
    }
}

fn name_at(path: &Path, offset: usize) -> &Path {
    let bytes = path.as_os_str().as_bytes();
    Path::new(OsStr::from_bytes(&bytes[offset.min(bytes.len())..]))
}

fn open_directory(dir: BorrowedFd<'_>, path: &Path) -> Result<OwnedFd, Errno> {
    openat(
        dir,
        path,
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC | OFlags::NOFOLLOW,
        Mode::empty(),
    )
}

fn read_entries(fd: &OwnedFd) -> Result<Vec<(OsString, Option<FileKind>)>, Errno> {
    let mut entries = Vec::new();
    for entry in Dir::read_from(fd)? {
        let entry = entry?;
        let name = entry.file_name().to_bytes();
        if name == b"." || name == b".." {
            continue;
        }
        entries.push((
            OsStr::from_bytes(name).to_os_string(),
            FileKind::from_file_type(entry.file_type()),
        ));
    }
    entries.sort_by(|left, right| left.0.as_bytes().cmp(right.0.as_bytes()));
    Ok(entries)
}
