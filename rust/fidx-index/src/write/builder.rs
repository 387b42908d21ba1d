use std::io::BufRead;

use fidx_common::{Result, error::Error};
use fidx_io::LineScanner;

use crate::{location::RowLocation, mapping::IndexMapping, options::IndexerOptions};

const UTF8_BOM: char = '\u{feff}';

/// Builds the mapping for `column` (zero-based) from the lines of `reader` in a
/// single pass.
///
/// Each line is split on `options.delimiter`; the value of `column` is
/// normalized with [`normalize_key`] and the line's location is appended to that
/// key's entry. Lines with fewer than `column + 1` fields are not indexed but still
/// advance the running offset. A UTF-8 byte order mark at the start of the source is
/// not part of the first key; it still counts towards the first line's location.
pub fn build_mapping<R: BufRead>(
    reader: R,
    column: usize,
    options: &IndexerOptions,
) -> Result<IndexMapping> {
    options.validate()?;

    let mut mapping = IndexMapping::new();
    let mut scanner = LineScanner::new(reader, options.terminator_width);
    let mut line_no = 0u64;
    let mut mismatch_reported = false;
    while let Some(line) = scanner
        .next_line()
        .map_err(|e| Error::io("source file", e))?
    {
        line_no += 1;
        if !mismatch_reported
            && line.observed_terminator != 0
            && line.observed_terminator as u64 != options.terminator_width
        {
            tracing::warn!(
                line = line_no,
                observed = line.observed_terminator,
                configured = options.terminator_width,
                "line terminator width differs from the configured width, row locations will be off"
            );
            mismatch_reported = true;
        }

        if line_no == 1 && options.skip_header {
            continue;
        }

        let text = String::from_utf8_lossy(&line.bytes);
        let mut text: &str = &text;
        if line_no == 1 {
            text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        }
        if let Some(value) = text.split(options.delimiter).nth(column) {
            mapping.push(
                &normalize_key(value),
                RowLocation::new(line.offset, line.len()),
            );
        }
    }

    tracing::debug!(
        lines = line_no,
        keys = mapping.len(),
        locations = mapping.locations_count(),
        "scanned source"
    );
    Ok(mapping)
}

/// Normalizes a raw column value into an index key: every `"` becomes a space and
/// surrounding whitespace is trimmed. This is not CSV unquoting; a quoted value
/// holding the delimiter has already been split apart.
pub fn normalize_key(value: &str) -> String {
    value.replace('"', " ").trim().to_string()
}

/// Computes the location of every line of `reader` under the assumed
/// `terminator_width`, in file order.
pub fn line_locations<R: BufRead>(reader: R, terminator_width: u64) -> Result<Vec<RowLocation>> {
    LineScanner::new(reader, terminator_width)
        .map(|line| {
            line.map(|line| RowLocation::new(line.offset, line.len()))
                .map_err(|e| Error::io("source file", e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{build_mapping, line_locations, normalize_key};
    use crate::{IndexerOptions, RowLocation};

    const TEAMS: &str = "Name,Team\r\n\"A\",BISONS\r\n\"B\",LIONS\r\n\"C\",BISONS\r\n";

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("\"A\""), "A");
        assert_eq!(normalize_key("  BISONS \t"), "BISONS");
        assert_eq!(normalize_key("a\"b"), "a b");
        assert_eq!(normalize_key("\"\""), "");
        assert_eq!(normalize_key("Lions"), "Lions");
    }

    #[test]
    fn test_build_teams_mapping() {
        let mapping =
            build_mapping(Cursor::new(TEAMS), 1, &IndexerOptions::default()).unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["Team", "BISONS", "LIONS"]);
        assert_eq!(mapping.get("Team").unwrap(), &[RowLocation::new(0, 9)]);
        assert_eq!(
            mapping.get("BISONS").unwrap(),
            &[RowLocation::new(11, 10), RowLocation::new(34, 10)]
        );
        assert_eq!(mapping.get("LIONS").unwrap(), &[RowLocation::new(23, 9)]);
    }

    #[test]
    fn test_skip_header() {
        let options = IndexerOptions::default().skip_header(true);
        let mapping = build_mapping(Cursor::new(TEAMS), 1, &options).unwrap();
        assert!(mapping.get("Team").is_none());
        assert_eq!(mapping.get("LIONS").unwrap(), &[RowLocation::new(23, 9)]);
    }

    #[test]
    fn test_short_rows_advance_offsets() {
        let data = "id,name,city\r\n1\r\n2,bob,Oslo\r\n\r\n3,eve\r\n4,ann,Oslo\r\n";
        let mapping = build_mapping(Cursor::new(data), 2, &IndexerOptions::default()).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get("Oslo").unwrap(),
            &[RowLocation::new(17, 10), RowLocation::new(38, 10)]
        );
        for loc in mapping.get("Oslo").unwrap() {
            let row = &data[loc.offset as usize..loc.end() as usize];
            assert!(row.ends_with("Oslo"));
        }
    }

    #[test]
    fn test_column_zero_indexes_every_line() {
        let data = "a\r\n\r\nb,c\r\n";
        let mapping = build_mapping(Cursor::new(data), 0, &IndexerOptions::default()).unwrap();
        assert_eq!(mapping.get("").unwrap(), &[RowLocation::new(3, 0)]);
        assert_eq!(mapping.get("b").unwrap(), &[RowLocation::new(5, 3)]);
    }

    #[test]
    fn test_custom_delimiter_and_lf() {
        let data = "k;v\nx;1\ny;2\nx;3";
        let options = IndexerOptions::default()
            .delimiter(';')
            .terminator_width(IndexerOptions::LF);
        let mapping = build_mapping(Cursor::new(data), 0, &options).unwrap();
        assert_eq!(
            mapping.get("x").unwrap(),
            &[RowLocation::new(4, 3), RowLocation::new(12, 3)]
        );
    }

    #[test]
    fn test_byte_order_mark_not_in_first_key() {
        let data = "\u{feff}Name,Team\r\n\u{feff}x,LIONS\r\n";
        let mapping = build_mapping(Cursor::new(data), 0, &IndexerOptions::default()).unwrap();
        assert_eq!(mapping.get("Name").unwrap(), &[RowLocation::new(0, 12)]);
        assert!(mapping.get("\u{feff}Name").is_none());
        // Only the leading mark of the file is dropped.
        assert_eq!(mapping.get("\u{feff}x").unwrap(), &[RowLocation::new(14, 10)]);
    }

    #[test]
    fn test_line_locations() {
        let locations = line_locations(Cursor::new(TEAMS), 2).unwrap();
        assert_eq!(
            locations,
            vec![
                RowLocation::new(0, 9),
                RowLocation::new(11, 10),
                RowLocation::new(23, 9),
                RowLocation::new(34, 10),
            ]
        );
    }
}
