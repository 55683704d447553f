//! Text/binary classification by content type, extension, and well-known file names.

use crate::domain::{text_extensions, text_filenames};
use crate::error::IngestError;
use std::path::Path;

/// Decide whether the file at `path` should be treated as text.
///
/// Rules, first match wins:
/// 1. the guessed content type for the extension is `text/*`
/// 2. the lower-cased extension is on the source/markup/config allow-list
/// 3. the lower-cased file name is a conventional extensionless text file
///
/// The decision is made from the name alone; the file need not exist.
pub fn is_text_file(path: &Path) -> Result<bool, IngestError> {
    let name = path
        .file_name()
        .ok_or_else(|| classification_error(path, "path has no file name"))?
        .to_str()
        .ok_or_else(|| classification_error(path, "file name is not valid UTF-8"))?;

    let guessed = mime_guess::from_path(path).first_raw();
    if guessed.is_some_and(|mime| mime.starts_with("text/")) {
        return Ok(true);
    }

    if let Some(ext) = extension_of(name) {
        if text_extensions().contains(&ext.as_str()) {
            return Ok(true);
        }
    }

    let lower = name.to_lowercase();
    Ok(text_filenames().contains(&lower.as_str()))
}

/// Lower-cased extension with leading dot.
///
/// Dotfiles such as `.gitignore` have no extension in `Path` terms; the whole
/// name is used instead so they can hit the allow-list.
fn extension_of(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    match Path::new(&lower).extension().and_then(|e| e.to_str()) {
        Some(ext) => Some(format!(".{ext}")),
        None if lower.starts_with('.') && lower.len() > 1 => Some(lower),
        None => None,
    }
}

fn classification_error(path: &Path, reason: &str) -> IngestError {
    IngestError::Classification { path: path.to_path_buf(), reason: reason.to_string() }
}
