//! repo-ingest: concatenate a repository's text files into one artifact

use anyhow::Result;

fn main() -> Result<()> {
    repo_ingest::cli::run()
}
