//! Plain-text ingestion artifact: banner, per-file blocks, and summary footer.

use crate::domain::RunSummary;
use std::io::{self, Write};
use std::path::Path;

const BANNER_RULE_WIDTH: usize = 80;
const FILE_RULE_WIDTH: usize = 60;

pub fn write_banner<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    let rule = "=".repeat(BANNER_RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "REPOSITORY INGESTION")?;
    writeln!(out, "Source Directory: {}", root.display())?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

/// Write one file block. `content` is copied verbatim, with a newline appended
/// only when it is non-empty and does not already end in one.
pub fn write_file_block<W: Write>(out: &mut W, relative: &str, content: &str) -> io::Result<()> {
    let rule = "=".repeat(FILE_RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "FILE: {relative}")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    out.write_all(content.as_bytes())?;
    if !content.is_empty() && !content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_footer<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let rule = "=".repeat(BANNER_RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "END OF REPOSITORY INGESTION")?;
    writeln!(out, "Files processed: {}", summary.files_processed)?;
    writeln!(out, "Files skipped: {}", summary.files_skipped)?;
    writeln!(out, "{rule}")
}
