//! Core domain types: run configuration, per-entry classification, and run summary.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "repository_ingestion.txt";

/// Skip patterns that are always in effect. Caller-supplied patterns are added on top.
pub fn default_skip_patterns() -> &'static [&'static str] {
    &[
        // Version control and caches
        ".git",
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
        "coverage",
        ".coverage",
        // Build output
        "dist",
        "build",
        ".next",
        ".nuxt",
        "target",
        "bin",
        "obj",
        // Editor metadata
        ".vscode",
        ".idea",
        ".DS_Store",
        "thumbs.db",
        // Dependencies and virtual environments
        "node_modules",
        "venv",
        ".venv",
        "env",
        // Local environment overrides
        ".env.local",
        ".env.*.local",
        // Compiled objects and executables
        "*.pyc",
        "*.pyo",
        "*.pyd",
        "*.so",
        "*.dylib",
        "*.dll",
        "*.exe",
        "*.app",
        // Packages and archives
        "*.deb",
        "*.rpm",
        "*.dmg",
        "*.pkg",
        "*.zip",
        "*.tar",
        "*.gz",
        "*.rar",
        "*.7z",
        // Images
        "*.jpg",
        "*.jpeg",
        "*.png",
        "*.gif",
        "*.bmp",
        "*.ico",
        // Audio and video
        "*.mp3",
        "*.mp4",
        "*.avi",
        "*.mov",
        "*.wmv",
        "*.flv",
        // Documents
        "*.pdf",
        "*.doc",
        "*.docx",
        "*.xls",
        "*.xlsx",
        "*.ppt",
        "*.pptx",
    ]
}

/// Extensions (lower-case, with leading dot) that are always treated as text.
pub fn text_extensions() -> &'static [&'static str] {
    &[
        ".py", ".js", ".html", ".css", ".json", ".yaml", ".yml", ".md", ".txt", ".toml", ".cfg",
        ".conf", ".ini", ".xml", ".sql", ".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat", ".ts",
        ".tsx", ".jsx", ".vue", ".svelte", ".go", ".rs", ".java", ".kt", ".scala", ".rb", ".php",
        ".cpp", ".c", ".h", ".hpp", ".cs", ".fs", ".clj", ".hs", ".ml", ".elm", ".r", ".jl",
        ".pl", ".pm", ".tcl", ".lua", ".nim", ".crystal", ".d", ".dart", ".ex", ".exs", ".erl",
        ".hrl", ".proto", ".graphql", ".gql", ".dockerfile", ".makefile", ".cmake", ".gradle",
        ".sbt", ".maven", ".pom", ".lock", ".gitignore", ".gitattributes", ".editorconfig",
        ".env",
    ]
}

/// Extensionless file names (lower-case) that are conventionally text.
pub fn text_filenames() -> &'static [&'static str] {
    &[
        "readme",
        "license",
        "changelog",
        "dockerfile",
        "makefile",
        "rakefile",
        "gemfile",
        "procfile",
        "requirements",
        "pipfile",
    ]
}

/// Effective settings for a single ingestion run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: PathBuf,
    #[serde(deserialize_with = "deserialize_patterns")]
    pub skip: Vec<String>,
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { output: PathBuf::from(DEFAULT_OUTPUT_FILE), skip: Vec::new(), follow_symlinks: false }
    }
}

/// Accept either a list of patterns or a single comma-separated string.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Patterns {
        One(String),
        Many(Vec<String>),
    }

    let raw = match Patterns::deserialize(deserializer)? {
        Patterns::One(s) => s.split(',').map(str::to_string).collect(),
        Patterns::Many(v) => v,
    };
    Ok(raw.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
}

/// Outcome of classifying one discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Included,
    SkippedByPattern,
    SkippedBinary,
    SkippedError,
}

/// Counters accumulated by the traversal loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub skipped_pattern: usize,
    pub skipped_binary: usize,
    pub skipped_error: usize,
}

impl RunSummary {
    /// Account for one classified entry. Every entry lands in exactly one bucket.
    pub fn record(&mut self, outcome: Classification) {
        match outcome {
            Classification::Included => {
                self.files_processed += 1;
                return;
            }
            Classification::SkippedByPattern => self.skipped_pattern += 1,
            Classification::SkippedBinary => self.skipped_binary += 1,
            Classification::SkippedError => self.skipped_error += 1,
        }
        self.files_skipped += 1;
    }

    pub fn files_seen(&self) -> usize {
        self.files_processed + self.files_skipped
    }
}
