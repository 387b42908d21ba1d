use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use fidx_common::{Result, error::Error};
use fidx_io::{FileWriter, SealingWrite};

use crate::{
    format::{read_mapping, write_mapping},
    location::RowLocation,
    mapping::IndexMapping,
    naming::index_file_path,
    options::IndexerOptions,
    write::builder::build_mapping,
};

/// Builds, persists, reloads and resolves a secondary index over one source file.
///
/// An indexer starts empty. [`Indexer::create`] scans the source file and writes
/// the index file; [`Indexer::load`] replaces the in-memory mapping with the
/// content of a previously written index file. [`Indexer::seek`] is valid in any
/// state and never fails.
///
/// The indexer exclusively owns its mapping and is not meant to be shared across
/// threads while `create` or `load` runs. Several indexers may work on the same
/// source file; they only share the index files on disk.
#[derive(Debug, Clone)]
pub struct Indexer {
    source: PathBuf,
    options: IndexerOptions,
    mapping: IndexMapping,
}

impl Indexer {
    pub fn new(source: impl Into<PathBuf>) -> Indexer {
        Self::with_options(source, IndexerOptions::default())
    }

    pub fn with_options(source: impl Into<PathBuf>, options: IndexerOptions) -> Indexer {
        Indexer {
            source: source.into(),
            options,
            mapping: IndexMapping::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn options(&self) -> &IndexerOptions {
        &self.options
    }

    /// The current in-memory mapping.
    pub fn mapping(&self) -> &IndexMapping {
        &self.mapping
    }

    /// Path of the index file named `index_name` for this source file.
    pub fn index_path(&self, index_name: &str) -> Result<PathBuf> {
        index_file_path(&self.source, index_name, self.options.index_dir.as_deref())
    }

    /// Indexes `column` (zero-based) of the source file and writes the result to
    /// the index file named `index_name`, overwriting any previous one.
    ///
    /// The mapping built by the scan replaces the current one once the index file
    /// is written, and stays available for [`Indexer::seek`]. A failed call leaves
    /// the current mapping untouched.
    ///
    /// # Errors
    ///
    /// Fails if the index name is unusable as part of a file name, if the source
    /// file cannot be read, if the index file cannot be written, or if an indexed
    /// value cannot be represented in the index file format. Rows with too few
    /// columns are skipped, not reported.
    pub fn create(&mut self, index_name: &str, column: usize) -> Result<()> {
        let index_path = self.index_path(index_name)?;
        tracing::debug!(
            source = %self.source.display(),
            index = %index_path.display(),
            column,
            "creating index"
        );

        let source = File::open(&self.source)
            .map_err(|e| Error::io(self.source.display().to_string(), e))?;
        let mapping = build_mapping(BufReader::new(source), column, &self.options)?;

        let written = match Self::write_index_file(&mapping, &index_path) {
            Ok(written) => written,
            Err(e) => {
                Self::remove_partial_index_file(&index_path);
                return Err(e);
            }
        };

        tracing::info!(
            index = %index_path.display(),
            keys = mapping.len(),
            locations = mapping.locations_count(),
            bytes = written,
            "index created"
        );
        self.mapping = mapping;
        Ok(())
    }

    /// Replaces the in-memory mapping with the content of the index file named
    /// `index_name`.
    ///
    /// The previous mapping is discarded once the index file is open, so a load
    /// that fails on malformed content leaves the indexer empty.
    ///
    /// # Errors
    ///
    /// Fails if the index file cannot be opened or read, or if a line is malformed.
    pub fn load(&mut self, index_name: &str) -> Result<()> {
        let index_path = self.index_path(index_name)?;
        let file =
            File::open(&index_path).map_err(|e| Error::io(index_path.display().to_string(), e))?;

        self.mapping = IndexMapping::new();
        self.mapping = read_mapping(BufReader::new(file)).inspect_err(|e| {
            tracing::debug!(index = %index_path.display(), error = %e, "index load failed")
        })?;

        tracing::info!(
            index = %index_path.display(),
            keys = self.mapping.len(),
            locations = self.mapping.locations_count(),
            "index loaded"
        );
        Ok(())
    }

    /// Returns a copy of the locations recorded for `key`, in file order. An
    /// unknown key yields an empty list.
    pub fn seek(&self, key: &str) -> Vec<RowLocation> {
        self.mapping
            .get(key)
            .map(<[RowLocation]>::to_vec)
            .unwrap_or_default()
    }

    fn write_index_file(mapping: &IndexMapping, index_path: &Path) -> Result<u64> {
        let context = || index_path.display().to_string();
        let mut writer = FileWriter::create(index_path).map_err(|e| Error::io(context(), e))?;
        let written = write_mapping(mapping, &mut writer)?;
        writer.seal().map_err(|e| Error::io(context(), e))?;
        Ok(written)
    }

    fn remove_partial_index_file(index_path: &Path) {
        match std::fs::remove_file(index_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                index = %index_path.display(),
                error = %e,
                "failed to remove partially written index file"
            ),
        }
    }
}
