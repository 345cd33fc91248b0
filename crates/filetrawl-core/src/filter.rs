//! Literal file name suffix filter.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A literal suffix tested against file names.
///
/// No glob or regex semantics: `.md` matches `notes.md` and `.md` itself,
/// but not `notes.mdx`. An empty filter matches every name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixFilter(CompactString);

impl SuffixFilter {
    /// Create a filter for the given suffix.
    pub fn new(suffix: impl Into<CompactString>) -> Self {
        Self(suffix.into())
    }

    /// A filter that matches every file.
    pub fn none() -> Self {
        Self(CompactString::default())
    }

    /// Returns true if this filter accepts every name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw suffix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Test a file name against the filter.
    pub fn matches(&self, name: &str) -> bool {
        name.ends_with(self.0.as_str())
    }
}

impl From<&str> for SuffixFilter {
    fn from(suffix: &str) -> Self {
        Self::new(suffix)
    }
}

impl From<String> for SuffixFilter {
    fn from(suffix: String) -> Self {
        Self::new(suffix)
    }
}

impl From<Option<String>> for SuffixFilter {
    fn from(suffix: Option<String>) -> Self {
        suffix.map(Self::new).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matches_everything() {
        let filter = SuffixFilter::none();
        assert!(filter.matches("anything"));
        assert!(filter.matches(""));
        assert!(SuffixFilter::from(None).is_empty());
    }

    #[test]
    fn test_literal_suffix() {
        let filter = SuffixFilter::from(".md");
        assert!(filter.matches("notes.md"));
        assert!(filter.matches(".md"));
        assert!(!filter.matches("notes.mdx"));
        assert!(!filter.matches(".mdbackup"));
        assert!(!filter.matches("NOTES.MD"));
    }

    #[test]
    fn test_no_pattern_semantics() {
        let filter = SuffixFilter::from("*.md");
        assert!(!filter.matches("notes.md"));
        assert!(filter.matches("weird*.md"));
    }
}
