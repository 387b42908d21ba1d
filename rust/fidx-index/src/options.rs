use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use fidx_common::{Result, error::Error, verify_arg};

/// Configuration of an [`Indexer`](crate::Indexer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerOptions {
    /// Column delimiter of the source file.
    pub delimiter: char,

    /// Width in bytes of the line terminator the source file is assumed to use.
    ///
    /// The builder never discovers the terminator: every row offset is computed as
    /// the sum of the preceding line lengths plus this width per line, so a value
    /// that disagrees with the file shifts every location after the first line.
    pub terminator_width: u64,

    /// When set, the first line contributes no index entry. Its bytes still count
    /// toward the offsets of the following rows.
    pub skip_header: bool,

    /// Directory holding the index files. Defaults to the source file's directory.
    pub index_dir: Option<PathBuf>,
}

impl IndexerOptions {
    /// `\r\n` terminated lines.
    pub const CRLF: u64 = 2;

    /// `\n` terminated lines.
    pub const LF: u64 = 1;

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator_width(mut self, width: u64) -> Self {
        self.terminator_width = width;
        self
    }

    pub fn skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.index_dir = Some(dir.into());
        self
    }

    /// Loads options from a JSON document. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<IndexerOptions> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<IndexerOptions> {
        serde_json::from_str(text)
            .map_err(|e| Error::malformed("indexer options", e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(delimiter, self.delimiter != '\r' && self.delimiter != '\n');
        Ok(())
    }
}

impl Default for IndexerOptions {
    fn default() -> Self {
        IndexerOptions {
            delimiter: ',',
            terminator_width: Self::CRLF,
            skip_header: false,
            index_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndexerOptions;

    #[test]
    fn test_defaults() {
        let options = IndexerOptions::default();
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.terminator_width, 2);
        assert!(!options.skip_header);
        assert!(options.index_dir.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let options = IndexerOptions::from_json_str(
            r#"{ "delimiter": ";", "terminator_width": 1, "skip_header": true }"#,
        )
        .unwrap();
        assert_eq!(
            options,
            IndexerOptions::default()
                .delimiter(';')
                .terminator_width(IndexerOptions::LF)
                .skip_header(true)
        );

        assert_eq!(
            IndexerOptions::from_json_str("{}").unwrap(),
            IndexerOptions::default()
        );
        assert!(
            IndexerOptions::from_json_str(r#"{ "delimiter": 5 }"#)
                .unwrap_err()
                .is_invalid_format()
        );
    }

    #[test]
    fn test_validate_rejects_line_break_delimiter() {
        assert!(IndexerOptions::default().delimiter('\n').validate().is_err());
        assert!(IndexerOptions::default().delimiter('\t').validate().is_ok());
    }
}
