use ahash::AHashMap;

use fidx_common::{Result, error::Error};

use crate::location::RowLocation;

/// A key and the locations of every row holding it, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: String,
    pub locations: Vec<RowLocation>,
}

impl IndexEntry {
    pub fn new(key: impl Into<String>) -> IndexEntry {
        IndexEntry {
            key: key.into(),
            locations: Vec::new(),
        }
    }
}

/// In-memory key to row locations mapping for one index.
///
/// Entries keep first-insertion order, which is the order their keys first appear
/// in the source file. Keys are unique; each entry's location list is append-only.
#[derive(Debug, Clone, Default)]
pub struct IndexMapping {
    entries: Vec<IndexEntry>,
    /// Key to position in `entries`.
    positions: AHashMap<String, usize>,
}

impl IndexMapping {
    pub fn new() -> IndexMapping {
        Default::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of row locations across all keys.
    pub fn locations_count(&self) -> usize {
        self.entries.iter().map(|e| e.locations.len()).sum()
    }

    /// Appends `location` to the entry for `key`, creating the entry if absent.
    pub fn push(&mut self, key: &str, location: RowLocation) {
        match self.positions.get(key) {
            Some(&pos) => self.entries[pos].locations.push(location),
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push(IndexEntry {
                    key: key.to_string(),
                    locations: vec![location],
                });
            }
        }
    }

    /// Adds a complete entry. Fails if an entry with the same key already exists.
    pub fn insert_entry(&mut self, entry: IndexEntry) -> Result<()> {
        if self.positions.contains_key(&entry.key) {
            return Err(Error::malformed(
                format!("index entry '{}'", entry.key),
                "duplicate key",
            ));
        }
        self.positions.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the recorded locations for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[RowLocation]> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].locations.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

/// Two mappings are equal when they hold the same keys with the same location
/// sequences, regardless of the order the keys were inserted in.
impl PartialEq for IndexMapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|e| other.get(&e.key) == Some(e.locations.as_slice()))
    }
}

impl Eq for IndexMapping {}

impl FromIterator<(String, RowLocation)> for IndexMapping {
    fn from_iter<T: IntoIterator<Item = (String, RowLocation)>>(iter: T) -> Self {
        let mut mapping = IndexMapping::new();
        for (key, location) in iter {
            mapping.push(&key, location);
        }
        mapping
    }
}
