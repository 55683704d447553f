//! Path rendering for file headers and log lines

use std::path::Path;

/// Render a root-relative path the way it appears in `FILE:` headers:
/// lossy UTF-8 with `/` as the separator on every platform.
pub fn header_path(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}
