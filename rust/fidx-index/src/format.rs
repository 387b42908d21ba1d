//! Index file codec.
//!
//! An index file holds one line per key:
//!
//! ```text
//! line     := key SEP (location SEP)* "\n"
//! location := offset FIELDSEP length
//! SEP      := "|"
//! FIELDSEP := ","
//! ```
//!
//! Offsets and lengths are unsigned decimal integers. Every line ends with a
//! trailing `SEP`, so splitting a line on `SEP` yields an empty last field, which
//! the decoder ignores along with any other empty field.

use std::{fmt::Write as _, io::BufRead};

use fidx_common::{Result, error::Error};
use fidx_io::SealingWrite;

use crate::{
    location::RowLocation,
    mapping::{IndexEntry, IndexMapping},
};

/// Separates the key from the locations, and the locations from each other.
pub const ENTRY_SEPARATOR: char = '|';

/// Separates the offset from the length within one location.
pub const FIELD_SEPARATOR: char = ',';

/// Appends the encoded line for `entry`, newline included, to `out`.
///
/// Fails if the key contains a character the line grammar reserves (`|`, `\r` or
/// `\n`), since such a line would not decode back to the same entry.
pub fn encode_entry(entry: &IndexEntry, out: &mut String) -> Result<()> {
    if let Some(c) = entry
        .key
        .chars()
        .find(|&c| c == ENTRY_SEPARATOR || c == '\r' || c == '\n')
    {
        return Err(Error::malformed(
            format!("index key '{}'", entry.key.escape_debug()),
            format!("key contains reserved character {:?}", c),
        ));
    }

    out.push_str(&entry.key);
    out.push(ENTRY_SEPARATOR);
    for location in &entry.locations {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{}{}{}{}",
            location.offset, FIELD_SEPARATOR, location.length, ENTRY_SEPARATOR
        );
    }
    out.push('\n');
    Ok(())
}

/// Decodes one index file line (without its newline) into an entry.
pub fn decode_entry(line: &str) -> Result<IndexEntry> {
    let mut fields = line.split(ENTRY_SEPARATOR);
    let key = fields.next().unwrap_or_default();
    let mut entry = IndexEntry::new(key);
    for field in fields.filter(|f| !f.is_empty()) {
        entry.locations.push(parse_location(field)?);
    }
    Ok(entry)
}

/// Writes every entry of `mapping` in insertion order and returns the number of
/// bytes written. The writer is not sealed.
pub fn write_mapping<W>(mapping: &IndexMapping, writer: &mut W) -> Result<u64>
where
    W: SealingWrite + ?Sized,
{
    let mut line = String::new();
    let mut written = 0u64;
    for entry in mapping.entries() {
        line.clear();
        encode_entry(entry, &mut line)?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| Error::io("index file", e))?;
        written += line.len() as u64;
    }
    Ok(written)
}

/// Reads a complete mapping from index file lines. Blank lines are skipped.
pub fn read_mapping<R: BufRead>(reader: R) -> Result<IndexMapping> {
    let mut mapping = IndexMapping::new();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io("index file", e))?;
        if line.is_empty() {
            continue;
        }
        mapping.insert_entry(decode_entry(&line)?)?;
    }
    Ok(mapping)
}

fn parse_location(field: &str) -> Result<RowLocation> {
    let (offset, length) = field.split_once(FIELD_SEPARATOR).ok_or_else(|| {
        Error::malformed(
            format!("location '{field}'"),
            "expected <offset>,<length>",
        )
    })?;
    Ok(RowLocation::new(
        parse_decimal(offset, field)?,
        parse_decimal(length, field)?,
    ))
}

fn parse_decimal(text: &str, field: &str) -> Result<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(
            format!("location '{field}'"),
            format!("'{text}' is not an unsigned decimal integer"),
        ));
    }
    text.parse::<u64>().map_err(|e| {
        Error::malformed(format!("location '{field}'"), format!("'{text}': {e}"))
    })
}
