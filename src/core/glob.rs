//! Glob matching for changed paths

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

/// A compiled `skip_if_unchanged` pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: GlobMatcher,
}

impl GlobPattern {
    /// Compile a shell-style glob.
    ///
    /// `*`, `?` and character classes stay within one path segment, `**`
    /// spans any number of directories.
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .empty_alternates(true)
            .build()?
            .compile_matcher();

        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    /// Compile a pattern, logging and discarding it when invalid
    pub fn compile_lenient(pattern: &str) -> Option<Self> {
        match Self::new(pattern) {
            Ok(glob) => Some(glob),
            Err(e) => {
                warn!(pattern, error = %e, "Invalid glob pattern, treating as no match");
                None
            }
        }
    }

    /// The pattern as written in the pipeline
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check a path string against this pattern
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Check whether `path` matches `pattern`.
///
/// An invalid pattern never matches.
pub fn matches(pattern: &str, path: &str) -> bool {
    GlobPattern::compile_lenient(pattern)
        .map(|glob| glob.is_match(path))
        .unwrap_or(false)
}
