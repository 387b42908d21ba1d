//! Create command implementation

use anyhow::{Context, Result};
use std::time::Instant;

use fidx_index::Indexer;

use crate::{commands::OptionsArgs, utils};

/// Run the create command
pub fn run(name: String, column: usize, options: OptionsArgs, source: String) -> Result<()> {
    utils::validate_file_exists(&source)?;
    let options = options.to_options()?;

    let start_time = Instant::now();
    let mut indexer = Indexer::with_options(&source, options);
    indexer
        .create(&name, column)
        .with_context(|| format!("Failed to create index '{name}' for {source}"))?;
    let elapsed = start_time.elapsed();

    let index_path = indexer.index_path(&name)?;
    let index_size = std::fs::metadata(&index_path)
        .with_context(|| format!("Failed to stat {}", index_path.display()))?
        .len();

    println!("Index created: {}", index_path.display());
    println!("  Column: {column}");
    println!("  Keys: {}", indexer.mapping().len());
    println!("  Rows: {}", indexer.mapping().locations_count());
    println!("  Index size: {}", utils::format_size(index_size));
    println!("  Total time: {:.3} seconds", elapsed.as_secs_f64());
    Ok(())
}
