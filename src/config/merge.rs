//! Merge CLI arguments over file-based configuration.

use crate::domain::Config;
use std::path::PathBuf;

/// Values supplied on the command line. `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub skip: Vec<String>,
    pub follow_symlinks: bool,
}

/// CLI > config file > defaults. Skip patterns accumulate instead of replacing.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(output) = cli.output {
        config.output = output;
    }

    for pattern in cli.skip {
        let pattern = pattern.trim();
        if !pattern.is_empty() && !config.skip.iter().any(|p| p == pattern) {
            config.skip.push(pattern.to_string());
        }
    }

    config.follow_symlinks |= cli.follow_symlinks;
    config
}
