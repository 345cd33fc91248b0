//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::filter::SuffixFilter;

/// Order in which matches from one directory are assembled.
///
/// Both policies are driven by listing index, never by the order in which
/// concurrent sub-scans complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanOrder {
    /// A subdirectory's matches are spliced in at the position the
    /// subdirectory occupies among its siblings.
    #[default]
    Listing,
    /// All subdirectory matches (in listing order) come before the
    /// directory's own file matches.
    DescendantsFirst,
}

/// Configuration for one scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root directory to scan. May be relative.
    pub root: PathBuf,

    /// Literal file name suffix. Empty matches every file.
    #[builder(default)]
    #[serde(default)]
    pub filter: SuffixFilter,

    /// Maximum depth to list (None = unlimited). The root is depth 0.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Maximum directory listings in flight (0 = unbounded).
    #[builder(default = "0")]
    #[serde(default)]
    pub max_concurrency: usize,

    /// How matches are ordered in the result.
    #[builder(default)]
    #[serde(default)]
    pub order: ScanOrder,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config that collects every file under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: SuffixFilter::none(),
            max_depth: None,
            include_hidden: true,
            max_concurrency: 0,
            order: ScanOrder::Listing,
        }
    }

    /// Create a config that collects files under `root` ending with `suffix`.
    pub fn with_filter(root: impl Into<PathBuf>, suffix: impl Into<SuffixFilter>) -> Self {
        Self {
            filter: suffix.into(),
            ..Self::new(root)
        }
    }

    /// Check if an entry should be skipped because it is hidden.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }

    /// Check if a directory at `depth` may still be listed.
    pub fn within_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .filter(".md")
            .max_concurrency(4usize)
            .order(ScanOrder::DescendantsFirst)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.filter.as_str(), ".md");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.order, ScanOrder::DescendantsFirst);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("example");
        assert_eq!(config.root, PathBuf::from("example"));
        assert!(config.filter.is_empty());
        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_concurrency, 0);
        assert_eq!(config.order, ScanOrder::Listing);
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = ScanConfig::new("/test");
        assert!(!config.should_skip_hidden(".git"));

        config.include_hidden = false;
        assert!(config.should_skip_hidden(".git"));
        assert!(!config.should_skip_hidden("src"));
    }

    #[test]
    fn test_within_depth() {
        let mut config = ScanConfig::new("/test");
        assert!(config.within_depth(1000));

        config.max_depth = Some(1);
        assert!(config.within_depth(0));
        assert!(config.within_depth(1));
        assert!(!config.within_depth(2));
    }
}
