//! Seek command implementation

use anyhow::{Context, Result};

use fidx_index::{Indexer, RowReader};

use crate::commands::OptionsArgs;

/// Run the seek command
pub fn run(name: String, options: OptionsArgs, source: String, keys: Vec<String>) -> Result<()> {
    let mut indexer = Indexer::with_options(&source, options.to_options()?);
    indexer
        .load(&name)
        .with_context(|| format!("Failed to load index '{name}' for {source}"))?;

    let reader =
        RowReader::open(&source).with_context(|| format!("Failed to open source: {source}"))?;

    for key in &keys {
        let locations = indexer.seek(key);
        println!("{key}: {} row(s)", locations.len());
        for location in locations {
            let row = reader
                .read_row(location)
                .with_context(|| format!("Failed to read row at {location} (stale index?)"))?;
            println!("  [{location}] {row}");
        }
    }
    Ok(())
}
