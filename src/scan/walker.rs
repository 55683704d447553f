//! Deterministic directory walk with skip-pattern pruning.

use super::skip::SkipPatterns;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A path discovered under the traversal root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    /// A non-directory entry; the caller classifies it.
    File(FileEntry),
    /// A subdirectory matching the skip patterns. Its contents are not walked.
    PrunedDir(FileEntry),
}

/// Depth-first walk over a traversal root.
///
/// Within a directory, files come before subdirectories and each group is
/// sorted by file name, so the order is stable for an unchanged tree.
pub struct Walk<'a> {
    inner: walkdir::IntoIter,
    root: &'a Path,
    skip: &'a SkipPatterns,
}

impl<'a> Walk<'a> {
    /// Walk `root`, pruning subdirectories that match `skip`.
    pub fn new(root: &'a Path, skip: &'a SkipPatterns, follow_symlinks: bool) -> Self {
        let inner =
            WalkDir::new(root).follow_links(follow_symlinks).sort_by(files_first).into_iter();
        Self { inner, root, skip }
    }

    fn entry(&self, path: PathBuf) -> FileEntry {
        let relative =
            path.strip_prefix(self.root).map(Path::to_path_buf).unwrap_or_else(|_| path.clone());
        FileEntry { path, relative }
    }

    /// A walk error on a non-directory entry (a broken symlink when links
    /// are followed) is still a file the caller must account for.
    fn errored_file(&self, err: &walkdir::Error) -> Option<FileEntry> {
        if err.loop_ancestor().is_some() || err.depth() == 0 {
            return None;
        }
        let path = err.path()?;
        let metadata = path.symlink_metadata().ok()?;
        if metadata.is_dir() || path.is_dir() {
            return None;
        }
        Some(self.entry(path.to_path_buf()))
    }
}

impl Iterator for Walk<'_> {
    type Item = Discovered;

    fn next(&mut self) -> Option<Discovered> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Unable to read directory entry: {}", err);
                    match self.errored_file(&err) {
                        Some(file) => return Some(Discovered::File(file)),
                        None => continue,
                    }
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            if entry.file_type().is_dir() {
                let relative = entry.path().strip_prefix(self.root).unwrap_or(entry.path());
                if self.skip.matches(relative) {
                    self.inner.skip_current_dir();
                    return Some(Discovered::PrunedDir(self.entry(entry.into_path())));
                }
                continue;
            }

            // Unfollowed symlink to a directory
            if entry.path().is_dir() {
                continue;
            }

            return Some(Discovered::File(self.entry(entry.into_path())));
        }
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
