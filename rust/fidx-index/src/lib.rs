//! Secondary index over a delimited text file.
//!
//! The index maps the values of one column to the byte ranges ([`RowLocation`]s) of
//! the rows holding them, so that matching rows can be fetched by seeking the source
//! file directly instead of scanning it.
//!
//! ```rust,ignore
//! let mut indexer = Indexer::new("teams.csv");
//! indexer.create("TeamName", 1)?;          // writes teams.TeamName.fidx
//!
//! let mut loader = Indexer::new("teams.csv");
//! loader.load("TeamName")?;
//! let rows = RowReader::open("teams.csv")?.read_rows(&loader.seek("BISONS"))?;
//! ```

mod format;
mod indexer;
mod location;
mod mapping;
mod naming;
mod options;
mod read;
mod write;

pub use format::{
    ENTRY_SEPARATOR, FIELD_SEPARATOR, decode_entry, encode_entry, read_mapping, write_mapping,
};
pub use indexer::Indexer;
pub use location::RowLocation;
pub use mapping::{IndexEntry, IndexMapping};
pub use naming::{INDEX_FILE_EXTENSION, index_file_name};
pub use options::IndexerOptions;
pub use read::row_reader::RowReader;
pub use write::builder::{build_mapping, line_locations, normalize_key};
