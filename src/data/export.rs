use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::loader::read_table;
use super::model::{Table, BMI_CATEGORY, SOURCE_COLUMNS};
use crate::error::DataLoadError;

pub const CSV_MIME: &str = "text/csv";

/// Serialise a view to UTF-8 CSV: header row, then one line per record.
///
/// Columns follow the source schema with `BMI_Category` last. Missing values
/// are written as empty fields. The header is written even for an empty view.
pub fn to_csv_bytes(view: &Table) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SOURCE_COLUMNS.iter().chain(std::iter::once(&BMI_CATEGORY)))?;
    for record in view {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Read back bytes produced by [`to_csv_bytes`].
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<Table, DataLoadError> {
    read_table(bytes)
}

/// Content hash of a view.
pub fn fingerprint(view: &Table) -> u64 {
    let mut hasher = DefaultHasher::new();
    view.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Export cache
// ---------------------------------------------------------------------------

/// Entries kept before the least recently used one is evicted.
pub const EXPORT_CACHE_CAPACITY: usize = 8;

/// Serialised bytes per distinct view content, bounded to the most
/// recently used views.
#[derive(Debug)]
pub struct ExportCache {
    capacity: usize,
    entries: HashMap<u64, Arc<[u8]>>,
    /// Keys from least to most recently used.
    recency: VecDeque<u64>,
}

impl Default for ExportCache {
    fn default() -> Self {
        ExportCache::with_capacity(EXPORT_CACHE_CAPACITY)
    }
}

impl ExportCache {
    pub fn with_capacity(capacity: usize) -> Self {
        ExportCache {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    pub fn get_or_export(&mut self, view: &Table) -> Result<Arc<[u8]>, csv::Error> {
        let key = fingerprint(view);
        if let Some(bytes) = self.entries.get(&key) {
            log::debug!("Export cache hit ({} rows)", view.len());
            let bytes = Arc::clone(bytes);
            self.touch(key);
            return Ok(bytes);
        }
        log::debug!("Export cache miss ({} rows)", view.len());
        let bytes: Arc<[u8]> = to_csv_bytes(view)?.into();
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.recency.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.entries.insert(key, Arc::clone(&bytes));
        self.recency.push_back(key);
        Ok(bytes)
    }

    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.recency.iter().position(|k| *k == key) {
            self.recency.remove(pos);
        }
        self.recency.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}
