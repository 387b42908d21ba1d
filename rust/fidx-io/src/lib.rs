//! I/O abstractions:
//! - `ReadAt`: positional reader with the ability to fetch a specified byte range from a file.
//! - `SealingWrite`: sequential writer with a `seal()` operation, committing the write activity.
//! - `LineScanner`: sequential line reader that tracks the byte offset of every line.
//!
//! Provides simple file-based implementations of the reader and writer.

use std::ops::Range;

pub mod file;
pub mod lines;
pub mod utils;

pub use file::{FileReader, FileWriter};
pub use lines::{LineScanner, ScannedLine};

/// A trait representing a conceptual file or buffer that supports reading from arbitrary
/// positions.
pub trait ReadAt: Send + Sync + 'static {
    /// Returns the size of the underlying object.
    fn size(&self) -> std::io::Result<u64>;

    /// Reads a specified range of bytes from the object.
    ///
    /// **NOTE**: `read_at` should not return with a short read, unless end-of-file
    /// is encountered.
    ///
    /// # Arguments
    ///
    /// * `range` - A `Range<u64>` that specifies the start and end positions for reading.
    ///   The function may return fewer bytes than requested if the range extends beyond
    ///   the end of the object.
    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>>;
}

/// A trait for sequential writing with explicit sealing semantics.
///
/// Unlike standard [`std::io::Write`], this trait requires explicit sealing to ensure
/// data is flushed and committed to the underlying storage medium. Dropping a writer
/// without sealing it releases the handle but gives no durability guarantee.
pub trait SealingWrite: Send {
    /// Writes the entire buffer to the underlying storage, appending it to any
    /// previously written data.
    ///
    /// # Errors
    ///
    /// Fails if the underlying storage reports an I/O error or the writer has
    /// already been sealed.
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Seals the writer, ensuring all buffered data is flushed and committed.
    ///
    /// Once sealed, the writer does not accept any further write operations.
    fn seal(&mut self) -> std::io::Result<()>;
}
