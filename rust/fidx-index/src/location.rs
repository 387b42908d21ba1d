use std::ops::Range;

/// Identifies exactly one row of the source file: `length` bytes starting at
/// `offset`, line terminator excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowLocation {
    pub offset: u64,
    pub length: u64,
}

impl RowLocation {
    pub fn new(offset: u64, length: u64) -> RowLocation {
        RowLocation { offset, length }
    }

    /// Offset one past the last byte of the row.
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    /// Byte range of the row within the source file.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }
}

impl std::fmt::Display for RowLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.offset, self.length)
    }
}

impl From<(u64, u64)> for RowLocation {
    fn from((offset, length): (u64, u64)) -> Self {
        RowLocation { offset, length }
    }
}
