use crate::expr::Expr;
use crate::output::ColorTable;
use std::path::PathBuf;

/// Immutable description of one oc-find run.
///
/// Built with [`RunConfig::builder`] and shared by reference with every
/// visit of the run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    roots: Vec<PathBuf>,
    expr: Expr,
    min_depth: usize,
    max_depth: usize,
    post_order: bool,
    colors: Option<ColorTable>,
}

impl RunConfig {
    /// Starts a configuration that evaluates `expr`.
    #[must_use]
    pub fn builder(expr: Expr) -> RunConfigBuilder {
        RunConfigBuilder {
            roots: Vec::new(),
            expr,
            min_depth: 0,
            max_depth: usize::MAX,
            post_order: false,
            colors: None,
        }
    }

    /// Roots in the order they are walked.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Root of the expression tree.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Smallest depth that is evaluated.
    #[must_use]
    pub const fn min_depth(&self) -> usize {
        self.min_depth
    }

    /// Largest depth that is evaluated; nothing below it is visited.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether directories are evaluated after their contents.
    #[must_use]
    pub const fn post_order(&self) -> bool {
        self.post_order
    }

    /// Color table, or `None` when output is not colored.
    #[must_use]
    pub const fn colors(&self) -> Option<&ColorTable> {
        self.colors.as_ref()
    }
}

/// Builder for [`RunConfig`].
#[derive(Clone, Debug)]
pub struct RunConfigBuilder {
    roots: Vec<PathBuf>,
    expr: Expr,
    min_depth: usize,
    max_depth: usize,
    post_order: bool,
    colors: Option<ColorTable>,
}

impl RunConfigBuilder {
    /// Appends a root.
    #[must_use]
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Appends several roots, keeping their order.
    #[must_use]
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Sets the inclusive minimum depth (`-mindepth`).
    #[must_use]
    pub fn min_depth(mut self, depth: usize) -> Self {
        self.min_depth = depth;
        self
    }

    /// Sets the inclusive maximum depth (`-maxdepth`).
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Evaluates directories after their contents (`-depth`).
    #[must_use]
    pub fn post_order(mut self, enabled: bool) -> Self {
        self.post_order = enabled;
        self
    }

    /// Enables colored output with `colors`, or disables it with `None`.
    #[must_use]
    pub fn colors(mut self, colors: Option<ColorTable>) -> Self {
        self.colors = colors;
        self
    }

    /// Finishes the configuration. Without explicit roots, `.` is walked.
    #[must_use]
    pub fn build(self) -> RunConfig {
        let roots = if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots
        };
        RunConfig {
            roots,
            expr: self.expr,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            post_order: self.post_order,
            colors: self.colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_walk_current_directory_without_bounds() {
        let config = RunConfig::builder(Expr::Print).build();
        assert_eq!(config.roots(), [PathBuf::from(".")]);
        assert_eq!(config.min_depth(), 0);
        assert_eq!(config.max_depth(), usize::MAX);
        assert!(!config.post_order());
        assert!(config.colors().is_none());
    }

    #[test]
    fn roots_keep_their_order() {
        let config = RunConfig::builder(Expr::Print)
            .root("b")
            .roots(["a", "c"])
            .min_depth(1)
            .max_depth(3)
            .post_order(true)
            .colors(Some(ColorTable::default()))
            .build();
        let roots: Vec<&Path> = config.roots().iter().map(PathBuf::as_path).collect();
        assert_eq!(roots, [Path::new("b"), Path::new("a"), Path::new("c")]);
        assert_eq!((config.min_depth(), config.max_depth()), (1, 3));
        assert!(config.post_order());
        assert!(config.colors().is_some());
    }
}
