//! Directory exclusion rules for tree traversal
//!
//! Patterns are globs matched against a single directory name, never
//! against a full path.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;

/// Errors for exclusion rules
#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
    #[error("Glob pattern error: {0}")]
    GlobError(#[from] globset::Error),
}

/// Directory names pruned from traversal
#[derive(Debug, Clone)]
pub struct DirExcludes {
    glob_set: GlobSet,
}

impl DirExcludes {
    /// Compile the given name patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExcludeError> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !pattern.is_empty() {
                builder.add(Glob::new(pattern)?);
            }
        }

        Ok(Self {
            glob_set: builder.build()?,
        })
    }

    /// Check if a directory with this name should be skipped
    pub fn is_excluded(&self, dir_name: &OsStr) -> bool {
        self.glob_set.is_match(dir_name.to_string_lossy().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_git() {
        let rules = DirExcludes::new(&[".git"]).unwrap();

        assert!(rules.is_excluded(OsStr::new(".git")));
        assert!(!rules.is_excluded(OsStr::new(".github")));
        assert!(!rules.is_excluded(OsStr::new("git")));
    }

    #[test]
    fn test_wildcard_patterns() {
        let rules = DirExcludes::new(&[".git", "_*"]).unwrap();

        assert!(rules.is_excluded(OsStr::new("_drafts")));
        assert!(!rules.is_excluded(OsStr::new("drafts")));
    }

    #[test]
    fn test_empty_rules_exclude_nothing() {
        let rules = DirExcludes::new::<&str>(&[]).unwrap();
        assert!(!rules.is_excluded(OsStr::new(".git")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(DirExcludes::new(&["a[b"]).is_err());
    }
}
