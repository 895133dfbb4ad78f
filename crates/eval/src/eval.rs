//! Evaluation of expression nodes against one visited entry.

use crate::expr::{Access, Expr};
use crate::state::EvalState;
use logging::trace_del;
use rustix::fs::{AtFlags, accessat, unlinkat};
use walk::{FileKind, WalkAction, WalkEntry};

impl Expr {
    /// Evaluates the tree for the entry held by `state`.
    ///
    /// Children are evaluated left to right. `And` skips its right side when
    /// the left side is false and `Or` when it is true; `Comma` always
    /// evaluates both. Actions record their control requests in `state`.
    pub fn evaluate(&self, state: &mut EvalState<'_, '_>) -> bool {
        match self {
            Self::Constant(value) => *value,
            Self::Access(access) => eval_access(*access, state.entry()),
            Self::Hidden => is_hidden(state.entry()),
            Self::Name(pattern) => pattern.is_match(state.entry().name()),
            Self::Path(pattern) => pattern.is_match(state.entry().path().as_os_str()),
            Self::Type(kind) => state.entry().kind() == *kind,
            Self::Print => {
                state.print();
                true
            }
            Self::Print0 => {
                state.print0();
                true
            }
            Self::Delete => eval_delete(state),
            Self::Prune => {
                state.request(WalkAction::SkipSubtree);
                true
            }
            Self::NoHidden => {
                if is_hidden(state.entry()) {
                    state.request(WalkAction::SkipSubtree);
                    false
                } else {
                    true
                }
            }
            Self::Quit => {
                state.request(WalkAction::Stop);
                true
            }
            Self::Not(child) => !child.evaluate(state),
            Self::And(lhs, rhs) => lhs.evaluate(state) && rhs.evaluate(state),
            Self::Or(lhs, rhs) => lhs.evaluate(state) || rhs.evaluate(state),
            Self::Comma(lhs, rhs) => {
                lhs.evaluate(state);
                rhs.evaluate(state)
            }
        }
    }
}

fn eval_access(access: Access, entry: &WalkEntry<'_>) -> bool {
    let at = entry.at();
    accessat(
        at.dir(),
        at.path(),
        access.to_rustix(),
        AtFlags::SYMLINK_NOFOLLOW,
    )
    .is_ok()
}

/// Roots are never hidden, whatever their spelling.
fn is_hidden(entry: &WalkEntry<'_>) -> bool {
    !entry.is_root()
        && entry.name_offset() > 0
        && entry.name().as_encoded_bytes().first() == Some(&b'.')
}

fn eval_delete(state: &mut EvalState<'_, '_>) -> bool {
    let entry = state.entry();
    let flags = if entry.kind() == FileKind::Directory {
        AtFlags::REMOVEDIR
    } else {
        AtFlags::empty()
    };
    let at = entry.at();
    match unlinkat(at.dir(), at.path(), flags) {
        Ok(()) => trace_del!(path = ?entry.path(), "deleted"),
        Err(errno) => {
            trace_del!(path = ?entry.path(), %errno, "delete failed, stopping");
            state.report_error(errno);
            state.request(WalkAction::Stop);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Output, RunConfig};
    use std::path::Path;
    use walk::{AtPath, Visit};

    fn hidden(path: &str, offset: usize, depth: usize) -> bool {
        let path = Path::new(path);
        let at = AtPath::cwd(path);
        let entry = WalkEntry::new(path, offset, depth, FileKind::Directory, Visit::Pre, at);
        is_hidden(&entry)
    }

    #[test]
    fn hidden_needs_nonzero_offset_and_leading_dot() {
        assert!(hidden("a/.git", 2, 1));
        assert!(!hidden(".git", 0, 1));
        assert!(!hidden(".", 0, 0));
        assert!(!hidden("a/git", 2, 1));
        assert!(!hidden("a/", 2, 1));
    }

    #[test]
    fn roots_are_never_hidden() {
        assert!(!hidden("a/.git", 2, 0));
        assert!(!hidden("/tmp/work/.cache/", 10, 0));
    }

    #[test]
    fn access_checks_do_not_follow_links() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("file");
        std::fs::write(&file, b"x").expect("write");
        let entry =
            WalkEntry::new(&file, 0, 0, FileKind::Regular, Visit::Pre, AtPath::cwd(&file));
        assert!(eval_access(Access::READ, &entry));
        assert!(eval_access(Access::default(), &entry));

        let missing = temp.path().join("missing");
        let at = AtPath::cwd(&missing);
        let entry = WalkEntry::new(&missing, 0, 0, FileKind::Regular, Visit::Pre, at);
        assert!(!eval_access(Access::READ, &entry));
    }

    #[test]
    fn delete_removes_files_and_empty_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("file");
        let dir = temp.path().join("dir");
        std::fs::write(&file, b"x").expect("write");
        std::fs::create_dir(&dir).expect("mkdir");
        let config = RunConfig::builder(Expr::Delete).build();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut output = Output::new(&mut stdout, &mut stderr);

        for (path, kind) in [(&file, FileKind::Regular), (&dir, FileKind::Directory)] {
            let entry = WalkEntry::new(path, 0, 1, kind, Visit::Pre, AtPath::cwd(path));
            let mut state = EvalState::new(&entry, &config, &mut output);
            assert!(Expr::Delete.evaluate(&mut state));
            assert_eq!(state.action(), WalkAction::Continue);
        }
        assert_eq!(output.error_count(), 0);
        assert!(!file.exists());
        assert!(!dir.exists());
    }
}
