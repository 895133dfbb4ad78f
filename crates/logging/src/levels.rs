//! crates/logging/src/levels.rs
//! Diagnostic subsystems and their tracing targets.

use std::fmt;
use std::str::FromStr;

/// Target prefix shared by every oc-find subsystem.
pub const TARGET_PREFIX: &str = "oc_find";

/// Diagnostic areas of the search engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subsystem {
    /// Directory traversal: entering, leaving, descriptor budget.
    Walk,
    /// Expression evaluation and visit dispatch.
    Eval,
    /// Destructive actions.
    Delete,
    /// Lazy metadata fetches.
    Stat,
    /// Command-line evaluation across roots.
    Run,
}

impl Subsystem {
    /// All subsystems, in declaration order.
    pub const ALL: [Self; 5] = [Self::Walk, Self::Eval, Self::Delete, Self::Stat, Self::Run];

    /// Returns the tracing target used by this subsystem's macro.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Walk => "oc_find::walk",
            Self::Eval => "oc_find::eval",
            Self::Delete => "oc_find::delete",
            Self::Stat => "oc_find::stat",
            Self::Run => "oc_find::run",
        }
    }

    /// Returns the short token used on the command line and in targets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Eval => "eval",
            Self::Delete => "delete",
            Self::Stat => "stat",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subsystem {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subsystem| subsystem.as_str() == token)
            .ok_or_else(|| format!("unknown diagnostic subsystem '{token}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_share_prefix() {
        for subsystem in Subsystem::ALL {
            let target = subsystem.target();
            assert!(target.starts_with(TARGET_PREFIX), "{target}");
            assert!(target.ends_with(subsystem.as_str()), "{target}");
        }
    }

    #[test]
    fn parse_round_trips_tokens() {
        assert_eq!("walk".parse::<Subsystem>(), Ok(Subsystem::Walk));
        assert_eq!("delete".parse::<Subsystem>(), Ok(Subsystem::Delete));
        assert_eq!("run".parse::<Subsystem>(), Ok(Subsystem::Run));
        assert!("del".parse::<Subsystem>().is_err());
    }
}
