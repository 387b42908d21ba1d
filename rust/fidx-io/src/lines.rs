//! Offset-tracking line scanner.
//!
//! The scanner yields successive lines with their terminators stripped, together
//! with the byte offset of each line's first byte. The running offset advances by
//! the stripped line length plus a caller-supplied terminator width, which is
//! *assumed* rather than discovered: the offsets are only correct for files whose
//! lines actually end with terminators of that width.

use std::io::BufRead;

/// A single line produced by [`LineScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Offset of the first byte of the line, computed under the assumed terminator width.
    pub offset: u64,
    /// Raw line bytes, terminator excluded.
    pub bytes: Vec<u8>,
    /// Width of the terminator actually observed after this line: 2 for `\r\n`,
    /// 1 for `\n`, 0 for a final line that ends at end-of-file.
    pub observed_terminator: usize,
}

impl ScannedLine {
    /// Length of the line in bytes, terminator excluded.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub struct LineScanner<R> {
    reader: R,
    terminator_width: u64,
    offset: u64,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, terminator_width: u64) -> LineScanner<R> {
        LineScanner {
            reader,
            terminator_width,
            offset: 0,
        }
    }

    /// Offset the next line is assumed to start at.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the next line, returning `None` at end of input.
    pub fn next_line(&mut self) -> std::io::Result<Option<ScannedLine>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        let mut observed_terminator = 0;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            observed_terminator = 1;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
                observed_terminator = 2;
            }
        }

        let line = ScannedLine {
            offset: self.offset,
            bytes,
            observed_terminator,
        };
        self.offset += line.len() + self.terminator_width;
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = std::io::Result<ScannedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::LineScanner;
    use std::io::Cursor;

    #[test]
    fn test_crlf_offsets() {
        let data = b"Name,Team\r\n\"A\",BISONS\r\n\r\nlast";
        let lines = LineScanner::new(Cursor::new(&data[..]), 2)
            .collect::<std::io::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].offset, 0);
        assert_eq!(lines[0].bytes, b"Name,Team");
        assert_eq!(lines[0].observed_terminator, 2);
        assert_eq!(lines[1].offset, 11);
        assert_eq!(lines[1].bytes, b"\"A\",BISONS");
        assert_eq!(lines[2].offset, 23);
        assert!(lines[2].is_empty());
        assert_eq!(lines[3].offset, 25);
        assert_eq!(lines[3].bytes, b"last");
        assert_eq!(lines[3].observed_terminator, 0);

        for line in &lines {
            let start = line.offset as usize;
            assert_eq!(&data[start..start + line.bytes.len()], line.bytes.as_slice());
        }
    }

    #[test]
    fn test_width_is_assumed_not_observed() {
        let data = b"ab\ncd\n";

        let mut scanner = LineScanner::new(Cursor::new(&data[..]), 2);
        let first = scanner.next_line().unwrap().unwrap();
        let second = scanner.next_line().unwrap().unwrap();
        assert_eq!(first.observed_terminator, 1);
        // Misconfigured width drifts by one byte per line.
        assert_eq!(second.offset, 4);
        assert_eq!(scanner.offset(), 8);
        assert!(scanner.next_line().unwrap().is_none());

        let mut scanner = LineScanner::new(Cursor::new(&data[..]), 1);
        scanner.next_line().unwrap();
        assert_eq!(scanner.next_line().unwrap().unwrap().offset, 3);
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = LineScanner::new(Cursor::new(Vec::new()), 2);
        assert!(scanner.next_line().unwrap().is_none());
        assert_eq!(scanner.offset(), 0);
    }
}
