//! Ingestion driver: walk the root, classify each file, and write the artifact.

use crate::domain::{Classification, Config, RunSummary};
use crate::error::IngestError;
use crate::render::{write_banner, write_file_block, write_footer};
use crate::scan::{Discovered, FileEntry, SkipPatterns, Walk};
use crate::utils::{header_path, is_text_file, read_text_lossy};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// What to do with one discovered file.
enum Prepared {
    Content(String),
    Skipped(Classification),
}

pub struct Ingester {
    root: PathBuf,
    output: PathBuf,
    skip: SkipPatterns,
    follow_symlinks: bool,
}

impl Ingester {
    /// Validate `root` and fix the skip pattern set for the run.
    pub fn new(root: &Path, config: &Config) -> Result<Self, IngestError> {
        if !root.exists() {
            return Err(IngestError::DirectoryNotFound { path: root.to_path_buf() });
        }
        if !root.is_dir() {
            return Err(IngestError::NotADirectory { path: root.to_path_buf() });
        }
        let root = root
            .canonicalize()
            .map_err(|_| IngestError::DirectoryNotFound { path: root.to_path_buf() })?;

        Ok(Self {
            root,
            output: config.output.clone(),
            skip: SkipPatterns::new(&config.skip),
            follow_symlinks: config.follow_symlinks,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Create (or truncate) the output file and ingest into it.
    pub fn run(&self) -> Result<RunSummary, IngestError> {
        let output_err =
            |source: io::Error| IngestError::Output { path: self.output.clone(), source };

        let file = File::create(&self.output).map_err(output_err)?;
        let artifact = fs::canonicalize(&self.output).ok();

        let mut out = BufWriter::new(file);
        let summary = self.ingest(&mut out, artifact.as_deref()).map_err(output_err)?;
        out.flush().map_err(output_err)?;

        Ok(summary)
    }

    /// Write the whole artifact to `out`. Only write errors on `out` abort;
    /// per-file problems are counted as skipped.
    ///
    /// `artifact` is the canonical path of the output file, which is never
    /// read into itself.
    pub fn ingest<W: Write>(
        &self,
        out: &mut W,
        artifact: Option<&Path>,
    ) -> io::Result<RunSummary> {
        tracing::debug!(
            "Walking {} with {} skip patterns",
            self.root.display(),
            self.skip.pattern_count()
        );

        write_banner(out, &self.root)?;

        let mut summary = RunSummary::default();
        for discovered in Walk::new(&self.root, &self.skip, self.follow_symlinks) {
            let entry = match discovered {
                Discovered::File(entry) => entry,
                Discovered::PrunedDir(dir) => {
                    let relative = header_path(&dir.relative);
                    tracing::info!("  Skipped: {}/", relative);
                    summary.record(Classification::SkippedByPattern);
                    continue;
                }
            };
            let relative = header_path(&entry.relative);
            tracing::info!("Processing: {}", relative);

            let outcome = match self.prepare(&entry, &relative, artifact) {
                Prepared::Content(content) => {
                    write_file_block(out, &relative, &content)?;
                    tracing::info!("  Processed: {}", relative);
                    Classification::Included
                }
                Prepared::Skipped(outcome) => outcome,
            };
            summary.record(outcome);
        }

        write_footer(out, &summary)?;
        Ok(summary)
    }

    fn prepare(&self, entry: &FileEntry, relative: &str, artifact: Option<&Path>) -> Prepared {
        if self.skip.matches(&entry.relative) {
            tracing::info!("  Skipped: {}", relative);
            return Prepared::Skipped(Classification::SkippedByPattern);
        }

        if is_artifact(&entry.path, artifact) {
            tracing::info!("  Skipped (output file): {}", relative);
            return Prepared::Skipped(Classification::SkippedByPattern);
        }

        match is_text_file(&entry.path) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("  Skipped (binary): {}", relative);
                return Prepared::Skipped(Classification::SkippedBinary);
            }
            Err(err) => {
                tracing::warn!("{}", err);
                tracing::info!("  Skipped (binary): {}", relative);
                return Prepared::Skipped(Classification::SkippedBinary);
            }
        }

        match read_text_lossy(&entry.path) {
            Ok(content) => Prepared::Content(content),
            Err(err) => {
                tracing::warn!("  {}", err);
                Prepared::Skipped(Classification::SkippedError)
            }
        }
    }
}

fn is_artifact(path: &Path, artifact: Option<&Path>) -> bool {
    let Some(artifact) = artifact else {
        return false;
    };
    if path.file_name() != artifact.file_name() {
        return false;
    }
    fs::canonicalize(path).is_ok_and(|p| p == artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_output(output: PathBuf) -> Config {
        Config { output, ..Config::default() }
    }

    fn ingest_to_string(root: &Path, config: &Config) -> (String, RunSummary) {
        let ingester = Ingester::new(root, config).unwrap();
        let mut buf = Vec::new();
        let summary = ingester.ingest(&mut buf, None).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[test]
    fn test_missing_root_is_configuration_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let err = Ingester::new(&missing, &Config::default()).err().unwrap();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_file_root_is_configuration_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let err = Ingester::new(&file, &Config::default()).err().unwrap();
        assert!(matches!(err, IngestError::NotADirectory { .. }));
    }

    #[test]
    fn test_basic_scenario_counts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.py"), "print(1)").unwrap();
        fs::create_dir_all(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules/x.js"), "module.exports = 1;").unwrap();
        fs::write(root.join("image.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let (text, summary) = ingest_to_string(root, &Config::default());

        assert_eq!(summary.files_processed, 1);
        // the pruned node_modules directory counts once, image.png once
        assert_eq!(summary.files_skipped, 2);
        assert_eq!(summary.skipped_pattern, 2);
        assert!(text.contains("FILE: a.py\n"));
        assert!(text.contains("\nprint(1)\n"));
        assert!(!text.contains("x.js"));
        assert!(!text.contains("image.png"));
    }

    #[test]
    fn test_binary_and_unknown_files_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("lib.rs"), "pub fn f() {}\n").unwrap();
        fs::write(root.join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
        fs::write(root.join("noext"), "hello").unwrap();

        let (text, summary) = ingest_to_string(root, &Config::default());

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.skipped_binary, 2);
        assert_eq!(summary.files_seen(), 3);
        assert!(!text.contains("FILE: blob.bin"));
        assert!(!text.contains("FILE: noext"));
    }

    #[test]
    fn test_extra_skip_patterns_apply() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("README.md"), "# Title\n").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/guide.md"), "guide\n").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}\n").unwrap();

        let config = Config { skip: vec!["*.md".to_string()], ..Config::default() };
        let (text, summary) = ingest_to_string(root, &config);

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 2);
        assert!(!text.contains(".md"));
        assert!(text.contains("FILE: main.rs"));
    }

    #[test]
    fn test_nested_paths_use_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("src/nested/mod.rs"), "mod a;\n").unwrap();

        let (text, _) = ingest_to_string(root, &Config::default());
        assert!(text.contains("FILE: src/nested/mod.rs\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let locked = root.join("locked.txt");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        fs::write(root.join("open.txt"), "visible").unwrap();

        // Running as root bypasses permission bits
        if fs::read(&locked).is_ok() {
            return;
        }

        let (text, summary) = ingest_to_string(root, &Config::default());
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.skipped_error, 1);
        assert!(!text.contains("FILE: locked.txt"));
        assert!(text.contains("visible\n"));
    }

    #[test]
    fn test_run_excludes_output_inside_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.txt"), "alpha").unwrap();
        let output = root.join("repository_ingestion.txt");

        let ingester = Ingester::new(root, &config_with_output(output.clone())).unwrap();
        let first = ingester.run().unwrap();
        let first_text = fs::read_to_string(&output).unwrap();
        let second = ingester.run().unwrap();
        let second_text = fs::read_to_string(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.files_processed, 1);
        assert_eq!(first.files_skipped, 1);
        assert_eq!(first_text, second_text);
        assert!(!first_text.contains("FILE: repository_ingestion.txt"));
    }

    #[test]
    fn test_run_truncates_existing_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.txt"), "alpha\n").unwrap();
        let output = tmp.path().join("out.txt");
        fs::write(&output, "stale content that must disappear").unwrap();

        Ingester::new(&root, &config_with_output(output.clone())).unwrap().run().unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(!text.contains("stale content"));
        assert!(text.starts_with(&"=".repeat(80)));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counted_with_and_without_follow() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.py"), "print(1)\n").unwrap();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt")).unwrap();

        for follow_symlinks in [false, true] {
            let config = Config { follow_symlinks, ..Config::default() };
            let (text, summary) = ingest_to_string(root, &config);

            assert_eq!(summary.files_processed, 1, "follow_symlinks={follow_symlinks}");
            assert_eq!(summary.files_skipped, 1, "follow_symlinks={follow_symlinks}");
            assert_eq!(summary.skipped_error, 1, "follow_symlinks={follow_symlinks}");
            assert!(!text.contains("FILE: dangling.txt"));
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_undecodable_file_name_is_skipped_and_run_continues() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join(OsStr::from_bytes(b"bad\xffname.txt")), "hidden").unwrap();
        fs::write(root.join("good.txt"), "shown\n").unwrap();

        let (text, summary) = ingest_to_string(root, &Config::default());

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.skipped_binary, 1);
        assert!(!text.contains("hidden"));
        assert!(text.contains("FILE: good.txt\n"));
        assert!(text.contains("Files processed: 1\nFiles skipped: 1\n"));
    }
}
