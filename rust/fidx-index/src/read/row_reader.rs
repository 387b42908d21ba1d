use std::path::Path;

use fidx_common::{Result, error::Error};
use fidx_io::{FileReader, ReadAt};

use crate::location::RowLocation;

/// Materializes rows of a source file from their [`RowLocation`]s.
///
/// Rows are decoded as UTF-8; invalid sequences are replaced rather than rejected.
pub struct RowReader<R> {
    inner: R,
}

impl RowReader<FileReader> {
    pub fn open(path: impl AsRef<Path>) -> Result<RowReader<FileReader>> {
        let path = path.as_ref();
        let reader =
            FileReader::open(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Ok(RowReader::new(reader))
    }
}

impl<R: ReadAt> RowReader<R> {
    pub fn new(inner: R) -> RowReader<R> {
        RowReader { inner }
    }

    /// Reads the raw bytes at `location`.
    ///
    /// A location that extends past the end of the source file means the index no
    /// longer matches the file, and is reported as a format error.
    pub fn read_row_bytes(&self, location: RowLocation) -> Result<Vec<u8>> {
        let bytes = self
            .inner
            .read_at(location.range())
            .map_err(|e| Error::io(format!("row at {location}"), e))?;
        if bytes.len() as u64 != location.length {
            return Err(Error::malformed(
                format!("row at {location}"),
                format!(
                    "location extends past the end of the source file ({} of {} bytes available)",
                    bytes.len(),
                    location.length
                ),
            ));
        }
        Ok(bytes)
    }

    /// Reads and decodes the row at `location`.
    pub fn read_row(&self, location: RowLocation) -> Result<String> {
        let bytes = self.read_row_bytes(location)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads and decodes every row in `locations`, preserving their order.
    pub fn read_rows(&self, locations: &[RowLocation]) -> Result<Vec<String>> {
        locations.iter().map(|&loc| self.read_row(loc)).collect()
    }
}
