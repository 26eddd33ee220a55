//! File and directory ignore pattern handling for pybake templates.
//! Processes .pybakeignore files to exclude specific paths from
//! generation, similar to .gitignore functionality.

use crate::constants::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("invalid pattern '{pattern}': {e}")))?;
    builder.add(glob);
    Ok(())
}

/// Reads the ignore file of a template and compiles it together with the
/// default patterns.
///
/// # Notes
/// - A missing ignore file yields only the default patterns
/// - Blank lines and lines starting with `#` are skipped
/// - Patterns match paths relative to the template root
///
/// # Example
/// ```ignore
/// # Contents of .pybakeignore:
/// *.pyc
/// .venv/**
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        add_pattern(&mut builder, pattern)?;
    }

    if ignore_path.exists() {
        let contents = std::fs::read_to_string(&ignore_path)?;
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            add_pattern(&mut builder, line)?;
        }
    } else {
        debug!("{IGNORE_FILE} does not exist");
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

/// Compiles the `_copy_without_render` patterns of a schema.
pub fn copy_without_render_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|e| {
            Error::ConfigError(format!("invalid _copy_without_render pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("_copy_without_render loading failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let set = parse_ignore_file(dir.path()).unwrap();
        assert!(set.is_match("project/.DS_Store"));
        assert!(set.is_match("project/pkg/__pycache__/mod.cpython-312.pyc"));
        assert!(!set.is_match("project/pkg/mod.py"));
    }

    #[test]
    fn file_patterns_are_added() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(IGNORE_FILE), "# comment\n\n*.log\n").unwrap();
        let set = parse_ignore_file(dir.path()).unwrap();
        assert!(set.is_match("build.log"));
        assert!(set.is_match("project/.DS_Store"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(IGNORE_FILE), "a[\n").unwrap();
        assert!(matches!(parse_ignore_file(dir.path()), Err(Error::IgnoreError(_))));
    }

    #[test]
    fn copy_without_render_patterns() {
        let set = copy_without_render_set(&["**/*.png"]).unwrap();
        assert!(set.is_match("project/docs/logo.png"));
        assert!(!set.is_match("project/docs/index.md"));
    }
}
