use thiserror::Error;

/// Errors raised while building an expression.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A `-name` or `-path` glob failed to compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern text as supplied.
        pattern: String,
        /// The compiler's diagnosis.
        source: globset::Error,
    },
    /// A `-type` argument was not one of `f d l b c p s`.
    #[error("unknown file type '{0}' (expected one of f, d, l, b, c, p, s)")]
    UnknownType(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn pattern_error_preserves_text_and_source() {
        let source = globset::GlobBuilder::new("[")
            .build()
            .expect_err("unterminated class");
        let error = EvalError::Pattern {
            pattern: "[".into(),
            source,
        };
        assert!(error.to_string().starts_with("invalid glob pattern '['"));
        assert!(error.source().is_some());
    }

    #[test]
    fn unknown_type_names_the_argument() {
        let error = EvalError::UnknownType("x".into());
        assert!(error.to_string().contains("'x'"));
        assert!(error.source().is_none());
    }
}
