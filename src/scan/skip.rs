//! Skip filter: literal name and `*.ext` suffix matching against a fixed pattern set.

use crate::domain::default_skip_patterns;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// The effective set of skip patterns for a run: built-in defaults plus caller additions.
#[derive(Debug, Clone)]
pub struct SkipPatterns {
    literals: BTreeSet<String>,
    suffixes: BTreeSet<String>,
}

impl SkipPatterns {
    /// Build the set from the defaults unioned with `extra`.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut literals = BTreeSet::new();
        let mut suffixes = BTreeSet::new();

        let defaults = default_skip_patterns().iter().map(|p| p.to_string());
        let extra = extra.into_iter().map(|p| p.as_ref().to_string());
        for pattern in defaults.chain(extra) {
            if pattern.is_empty() {
                continue;
            }
            // "*.md" is kept as the suffix ".md"
            match pattern.strip_prefix('*') {
                Some(suffix) if suffix.starts_with('.') => {
                    suffixes.insert(suffix.to_string());
                }
                _ => {
                    literals.insert(pattern);
                }
            }
        }

        Self { literals, suffixes }
    }

    pub fn pattern_count(&self) -> usize {
        self.literals.len() + self.suffixes.len()
    }

    /// Whether `path` should be excluded.
    ///
    /// Matches when any path component equals a literal pattern, or the file
    /// name ends with a `*.ext` pattern's suffix.
    pub fn matches(&self, path: &Path) -> bool {
        let segment_hit = path.components().any(|c| match c {
            Component::Normal(part) => {
                part.to_str().is_some_and(|s| self.literals.contains(s))
            }
            _ => false,
        });
        if segment_hit {
            return true;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

impl Default for SkipPatterns {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directories_match_any_segment() {
        let skip = SkipPatterns::default();
        assert!(skip.matches(Path::new("node_modules/x.js")));
        assert!(skip.matches(Path::new("src/.git/config")));
        assert!(skip.matches(Path::new("pkg/__pycache__")));
        assert!(!skip.matches(Path::new("src/main.rs")));
    }

    #[test]
    fn test_default_extension_wildcards() {
        let skip = SkipPatterns::default();
        assert!(skip.matches(Path::new("image.png")));
        assert!(skip.matches(Path::new("docs/report.pdf")));
        assert!(skip.matches(Path::new("a/b/module.pyc")));
        assert!(!skip.matches(Path::new("a.py")));
    }

    #[test]
    fn test_segment_match_is_exact() {
        let skip = SkipPatterns::default();
        // "build" is a pattern, "builder" is not
        assert!(!skip.matches(Path::new("builder/main.rs")));
        assert!(skip.matches(Path::new("build/main.rs")));
        // "env" only matches as a whole segment
        assert!(!skip.matches(Path::new("environment.py")));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let skip = SkipPatterns::default();
        assert!(!skip.matches(Path::new("LOGO.PNG")));
    }

    #[test]
    fn test_caller_patterns_are_added_not_replacing() {
        let skip = SkipPatterns::new(["*.md", "fixtures"]);
        assert!(skip.matches(Path::new("README.md")));
        assert!(skip.matches(Path::new("tests/fixtures/data.json")));
        // defaults are still active
        assert!(skip.matches(Path::new("node_modules/x.js")));
        assert_eq!(skip.pattern_count(), SkipPatterns::default().pattern_count() + 2);
    }

    #[test]
    fn test_literal_filename_match() {
        let skip = SkipPatterns::new(["secrets.yaml"]);
        assert!(skip.matches(Path::new("config/secrets.yaml")));
        assert!(!skip.matches(Path::new("config/secrets.yml")));
    }

    #[test]
    fn test_empty_patterns_ignored() {
        let skip = SkipPatterns::new(["", "*"]);
        // "*" has no ".ext" part so it is a literal that only matches a file named "*"
        assert_eq!(skip.pattern_count(), SkipPatterns::default().pattern_count() + 1);
        assert!(!skip.matches(Path::new("main.rs")));
    }
}
