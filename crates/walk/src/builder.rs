use crate::walker::{WalkOptions, Walker};
use std::path::PathBuf;

/// Number of directory descriptors kept open when no budget is configured.
pub const DEFAULT_MAX_OPEN_DIRS: usize = 64;

/// Configures a filesystem traversal rooted at a specific path.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    options: WalkOptions,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    ///
    /// The path is used verbatim: entries below it are reported as
    /// `root/child`, never canonicalised.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            options: WalkOptions {
                post_order: false,
                prefetch_metadata: false,
                max_open_dirs: DEFAULT_MAX_OPEN_DIRS,
            },
        }
    }

    /// Requests a second, post-order visit for every directory that was
    /// opened, delivered after all of its children.
    #[must_use]
    pub fn post_order(mut self, enabled: bool) -> Self {
        self.options.post_order = enabled;
        self
    }

    /// Stats every entry up front so visitors always receive metadata.
    ///
    /// Without this option only entries whose type the directory listing did
    /// not report are stat'ed.
    #[must_use]
    pub fn prefetch_metadata(mut self, enabled: bool) -> Self {
        self.options.prefetch_metadata = enabled;
        self
    }

    /// Limits how many directory descriptors the walker keeps open at once.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn max_open_dirs(mut self, budget: usize) -> Self {
        self.options.max_open_dirs = budget.max(1);
        self
    }

    /// Builds a [`Walker`] using the configured options.
    #[must_use]
    pub fn build(self) -> Walker {
        Walker::new(self.root, self.options)
    }
}
