use crate::error::EvalError;
use globset::{GlobBuilder, GlobMatcher};
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use walk::FileKind;

/// Permission bits checked by an access test.
///
/// An empty set only checks that the entry exists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Access {
    read: bool,
    write: bool,
    execute: bool,
}

impl Access {
    /// Read permission (`-readable`).
    pub const READ: Self = Self {
        read: true,
        write: false,
        execute: false,
    };
    /// Write permission (`-writable`).
    pub const WRITE: Self = Self {
        read: false,
        write: true,
        execute: false,
    };
    /// Execute or search permission (`-executable`).
    pub const EXECUTE: Self = Self {
        read: false,
        write: false,
        execute: true,
    };

    /// Combines two permission sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            write: self.write || other.write,
            execute: self.execute || other.execute,
        }
    }

    /// Whether read permission is requested.
    #[must_use]
    pub const fn read(self) -> bool {
        self.read
    }

    /// Whether write permission is requested.
    #[must_use]
    pub const fn write(self) -> bool {
        self.write
    }

    /// Whether execute permission is requested.
    #[must_use]
    pub const fn execute(self) -> bool {
        self.execute
    }

    pub(crate) fn to_rustix(self) -> rustix::fs::Access {
        let mut access = rustix::fs::Access::empty();
        if self.read {
            access |= rustix::fs::Access::READ_OK;
        }
        if self.write {
            access |= rustix::fs::Access::WRITE_OK;
        }
        if self.execute {
            access |= rustix::fs::Access::EXEC_OK;
        }
        if access.is_empty() {
            rustix::fs::Access::EXISTS
        } else {
            access
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::with_capacity(3);
        if self.read {
            names.push("-readable");
        }
        if self.write {
            names.push("-writable");
        }
        if self.execute {
            names.push("-executable");
        }
        if names.is_empty() {
            return f.write_str("-true");
        }
        f.write_str(&names.join(" "))
    }
}

/// A compiled shell glob.
///
/// `*` and `?` also match `/`, a backslash escapes the next character, and
/// leading dots are not special.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    matcher: GlobMatcher,
}

impl Pattern {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Pattern`] when the glob is malformed.
    pub fn new(source: &str) -> Result<Self, EvalError> {
        let glob = GlobBuilder::new(source)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|error| EvalError::Pattern {
                pattern: source.to_owned(),
                source: error,
            })?;
        Ok(Self {
            source: source.to_owned(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests the whole of `candidate` against the glob.
    #[must_use]
    pub fn is_match(&self, candidate: &OsStr) -> bool {
        self.matcher.is_match(Path::new(candidate))
    }
}

/// A node of the expression tree.
///
/// Leaves are tests (no side effects) or actions; `Not` has one child and the
/// binary combinators two. Children are evaluated left to right.
#[derive(Clone, Debug)]
pub enum Expr {
    /// `-true` or `-false`.
    Constant(bool),
    /// `-readable`, `-writable`, `-executable`: an access check that never
    /// follows symlinks.
    Access(Access),
    /// Basename starts with `.` and the entry is not a bare root.
    Hidden,
    /// `-name`: glob against the basename.
    Name(Pattern),
    /// `-path`: glob against the whole path.
    Path(Pattern),
    /// `-type`: the entry's type equals this kind.
    Type(FileKind),
    /// Print the path and a newline.
    Print,
    /// Print the path and a NUL byte.
    Print0,
    /// Remove the entry; a failure stops the run.
    Delete,
    /// Do not descend into the entry.
    Prune,
    /// Prune hidden entries and fail for them.
    NoHidden,
    /// Stop the run.
    Quit,
    /// Logical negation.
    Not(Box<Expr>),
    /// Short-circuit conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Short-circuit disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Evaluates both sides and yields the right-hand result.
    Comma(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// `-name pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Pattern`] when the glob is malformed.
    pub fn name(pattern: &str) -> Result<Self, EvalError> {
        Pattern::new(pattern).map(Self::Name)
    }

    /// `-path pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Pattern`] when the glob is malformed.
    pub fn path(pattern: &str) -> Result<Self, EvalError> {
        Pattern::new(pattern).map(Self::Path)
    }

    /// `-type code` for one of the letters `f d l b c p s`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownType`] for anything else.
    pub fn type_code(code: &str) -> Result<Self, EvalError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => FileKind::from_type_char(letter)
                .map(Self::Type)
                .ok_or_else(|| EvalError::UnknownType(code.to_owned())),
            _ => Err(EvalError::UnknownType(code.to_owned())),
        }
    }

    /// `-readable`.
    #[must_use]
    pub const fn readable() -> Self {
        Self::Access(Access::READ)
    }

    /// `-writable`.
    #[must_use]
    pub const fn writable() -> Self {
        Self::Access(Access::WRITE)
    }

    /// `-executable`.
    #[must_use]
    pub const fn executable() -> Self {
        Self::Access(Access::EXECUTE)
    }

    /// `! child`.
    #[must_use]
    pub fn not(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// `lhs -a rhs`.
    #[must_use]
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// `lhs -o rhs`.
    #[must_use]
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// `lhs , rhs`.
    #[must_use]
    pub fn comma(lhs: Self, rhs: Self) -> Self {
        Self::Comma(Box::new(lhs), Box::new(rhs))
    }

    /// Folds `exprs` into a left-leaning conjunction, or `None` when empty.
    #[must_use]
    pub fn all<I>(exprs: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        exprs.into_iter().reduce(Self::and)
    }

    /// Whether any node of the tree is one of the given actions.
    ///
    /// Front-ends use this to decide whether an implicit `-print` is needed.
    #[must_use]
    pub fn contains_action(&self, matches: fn(&Self) -> bool) -> bool {
        if matches(self) {
            return true;
        }
        match self {
            Self::Not(child) => child.contains_action(matches),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) | Self::Comma(lhs, rhs) => {
                lhs.contains_action(matches) || rhs.contains_action(matches)
            }
            _ => false,
        }
    }
}

fn quote(pattern: &str) -> String {
    format!("'{}'", pattern.replace('\'', r"'\''"))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(true) => f.write_str("-true"),
            Self::Constant(false) => f.write_str("-false"),
            Self::Access(access) => write!(f, "{access}"),
            Self::Hidden => f.write_str("-hidden"),
            Self::Name(pattern) => write!(f, "-name {}", quote(pattern.as_str())),
            Self::Path(pattern) => write!(f, "-path {}", quote(pattern.as_str())),
            Self::Type(kind) => write!(f, "-type {kind}"),
            Self::Print => f.write_str("-print"),
            Self::Print0 => f.write_str("-print0"),
            Self::Delete => f.write_str("-delete"),
            Self::Prune => f.write_str("-prune"),
            Self::NoHidden => f.write_str("-nohidden"),
            Self::Quit => f.write_str("-quit"),
            Self::Not(child) => write!(f, "( ! {child} )"),
            Self::And(lhs, rhs) => write!(f, "( {lhs} -a {rhs} )"),
            Self::Or(lhs, rhs) => write!(f, "( {lhs} -o {rhs} )"),
            Self::Comma(lhs, rhs) => write!(f, "( {lhs} , {rhs} )"),
        }
    }
}
