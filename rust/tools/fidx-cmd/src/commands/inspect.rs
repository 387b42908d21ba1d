//! Inspect command implementation

use anyhow::{Context, Result};
use serde::Serialize;

use fidx_index::{IndexMapping, Indexer};

use crate::{commands::OptionsArgs, utils};

#[derive(Serialize)]
struct InspectSummary {
    index_path: String,
    index_bytes: u64,
    key_count: usize,
    row_count: usize,
    max_rows_per_key: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keys: Vec<KeyInfo>,
}

#[derive(Serialize)]
struct KeyInfo {
    key: String,
    rows: usize,
}

/// Run the inspect command
pub fn run(name: String, verbose: u8, options: OptionsArgs, source: String) -> Result<()> {
    let mut indexer = Indexer::with_options(&source, options.to_options()?);
    let index_path = indexer.index_path(&name)?;
    indexer
        .load(&name)
        .with_context(|| format!("Failed to load index: {}", index_path.display()))?;

    let index_bytes = std::fs::metadata(&index_path)
        .with_context(|| format!("Failed to stat {}", index_path.display()))?
        .len();

    let summary = summarize(
        indexer.mapping(),
        index_path.display().to_string(),
        index_bytes,
        verbose > 0,
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(
    mapping: &IndexMapping,
    index_path: String,
    index_bytes: u64,
    with_keys: bool,
) -> InspectSummary {
    let keys = if with_keys {
        mapping
            .entries()
            .iter()
            .map(|e| KeyInfo {
                key: utils::truncate_display(&e.key, 64),
                rows: e.locations.len(),
            })
            .collect()
    } else {
        Vec::new()
    };

    InspectSummary {
        index_path,
        index_bytes,
        key_count: mapping.len(),
        row_count: mapping.locations_count(),
        max_rows_per_key: mapping
            .entries()
            .iter()
            .map(|e| e.locations.len())
            .max()
            .unwrap_or(0),
        keys,
    }
}
