//! Command implementations for fidx-cmd

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use fidx_index::IndexerOptions;

pub mod create;
pub mod inspect;
pub mod offsets;
pub mod seek;

/// Indexer options shared by the commands that build or load an index.
///
/// Values given on the command line override those read from `--config`.
#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// JSON file with indexer options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Assumed line terminator width in bytes (2 for CRLF, 1 for LF)
    #[arg(long)]
    terminator_width: Option<u64>,

    /// Do not index the first line
    #[arg(long)]
    skip_header: bool,

    /// Directory holding the index files (defaults to the source file's directory)
    #[arg(long)]
    index_dir: Option<PathBuf>,
}

impl OptionsArgs {
    pub fn to_options(&self) -> Result<IndexerOptions> {
        let mut options = match &self.config {
            Some(path) => IndexerOptions::from_json_file(path)
                .with_context(|| format!("Failed to read options from {}", path.display()))?,
            None => IndexerOptions::default(),
        };
        if let Some(delimiter) = self.delimiter {
            options.delimiter = delimiter;
        }
        if let Some(width) = self.terminator_width {
            options.terminator_width = width;
        }
        if self.skip_header {
            options.skip_header = true;
        }
        if let Some(dir) = &self.index_dir {
            options.index_dir = Some(dir.clone());
        }
        options.validate().with_context(|| "Invalid indexer options")?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::OptionsArgs;
    use fidx_index::IndexerOptions;

    #[test]
    fn test_defaults_without_flags() {
        let options = OptionsArgs::default().to_options().unwrap();
        assert_eq!(options, IndexerOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = tempdir.path().join("options.json");
        std::fs::write(
            &config,
            r#"{ "delimiter": ";", "terminator_width": 1, "skip_header": true }"#,
        )
        .unwrap();

        let args = OptionsArgs {
            config: Some(config),
            delimiter: Some('\t'),
            ..Default::default()
        };
        let options = args.to_options().unwrap();
        assert_eq!(options.delimiter, '\t');
        assert_eq!(options.terminator_width, 1);
        assert!(options.skip_header);
    }

    #[test]
    fn test_invalid_options() {
        let args = OptionsArgs {
            delimiter: Some('\n'),
            ..Default::default()
        };
        assert!(args.to_options().is_err());

        let args = OptionsArgs {
            config: Some("/definitely/not/here.json".into()),
            ..Default::default()
        };
        assert!(args.to_options().is_err());
    }
}
