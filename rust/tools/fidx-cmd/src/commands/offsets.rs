//! Offsets command implementation
//!
//! Scans a source file under an assumed terminator width and reads every computed
//! location back, reporting locations whose bytes are not the scanned line.

use anyhow::{Context, Result};
use std::{fs::File, io::BufReader};

use fidx_index::{RowLocation, RowReader, line_locations};

use crate::utils;

/// Run the offsets command
pub fn run(terminator_width: u64, verbose: bool, source: String) -> Result<()> {
    utils::validate_file_exists(&source)?;
    let file = File::open(&source).with_context(|| format!("Failed to open source: {source}"))?;
    let locations = line_locations(BufReader::new(file), terminator_width)
        .with_context(|| format!("Failed to scan source: {source}"))?;

    let reader =
        RowReader::open(&source).with_context(|| format!("Failed to open source: {source}"))?;
    let mismatches = check_locations(
        &locations,
        |location| reader.read_row_bytes(location).ok(),
        |line_no, location, bytes| {
            if verbose {
                println!(
                    "{line_no:>8} [{location}] {}",
                    utils::truncate_display(&String::from_utf8_lossy(bytes), 80)
                );
            }
        },
    );

    for (line_no, location) in &mismatches {
        println!("mismatch at line {line_no}: [{location}]");
    }
    println!("Lines: {}", locations.len());
    println!("Terminator width: {terminator_width}");
    println!("Mismatches: {}", mismatches.len());
    if !mismatches.is_empty() {
        anyhow::bail!(
            "{} of {} line locations do not match the file; check the terminator width",
            mismatches.len(),
            locations.len()
        );
    }
    Ok(())
}

/// Returns the (1-based line number, location) pairs whose bytes could not be read
/// in full or contain a line terminator.
fn check_locations<F, V>(
    locations: &[RowLocation],
    read: F,
    mut visit: V,
) -> Vec<(usize, RowLocation)>
where
    F: Fn(RowLocation) -> Option<Vec<u8>>,
    V: FnMut(usize, RowLocation, &[u8]),
{
    let mut mismatches = Vec::new();
    for (i, &location) in locations.iter().enumerate() {
        let line_no = i + 1;
        match read(location) {
            Some(bytes) if !bytes.contains(&b'\n') && !bytes.contains(&b'\r') => {
                visit(line_no, location, &bytes)
            }
            _ => mismatches.push((line_no, location)),
        }
    }
    mismatches
}
