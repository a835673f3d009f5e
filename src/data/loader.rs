use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::model::{BmiCategory, Record, Table, BMI, SOURCE_COLUMNS};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the testing sheet from a CSV file on disk.
pub fn load_table(path: &Path) -> Result<Table, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(file)?;
    log::info!("Loaded {} students from {}", table.len(), path.display());
    Ok(table)
}

/// Parse CSV from any reader and derive `BMI_Category` for every row.
///
/// Every source column except `BMI` must be present in the header; `BMI` is
/// filled in from height and weight when the column or a cell is missing.
/// Empty cells and the usual spreadsheet tokens (`NA`, `N/A`, `null`, ...)
/// count as missing; any other non-numeric text in a measure is an error.
/// Unknown columns are ignored, so a previously exported file loads again.
pub fn read_table<R: Read>(reader: R) -> Result<Table, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = SOURCE_COLUMNS
        .iter()
        .filter(|col| **col != BMI)
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let mut record = result?;
        normalise(&mut record, row_no);
        records.push(record);
    }

    warn_on_duplicate_names(&records);
    Ok(Table::new(records))
}

/// NaN/inf cells become missing, BMI is derived if absent, category assigned.
fn normalise(record: &mut Record, row_no: usize) {
    let mut dropped = 0;
    for value in record.measures_mut() {
        if value.is_some_and(|v| !v.is_finite()) {
            *value = None;
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!(
            "Row {row_no} ({}): {dropped} non-finite value(s) treated as missing",
            record.name
        );
    }
    if record.bmi.is_none() {
        record.bmi = record.computed_bmi();
    }
    record.bmi_category = record.bmi.and_then(BmiCategory::from_bmi);
}

fn warn_on_duplicate_names(records: &[Record]) {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.name.as_str()) {
            log::warn!("Duplicate student name '{}' in dataset", r.name);
        }
    }
}

// ---------------------------------------------------------------------------
// Process-wide dataset cache
// ---------------------------------------------------------------------------

/// Holds the loaded table for the life of the process.
///
/// The table is read from disk on the first [`get`](Self::get) and then
/// shared read-only. It is only re-read on an explicit
/// [`reload`](Self::reload) (or after [`invalidate`](Self::invalidate)).
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    table: Option<Arc<Table>>,
    source_modified: Option<SystemTime>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            table: None,
            source_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached table, loading it if this is the first call.
    pub fn get(&mut self) -> Result<Arc<Table>, DataLoadError> {
        match &self.table {
            Some(table) => Ok(Arc::clone(table)),
            None => self.reload(),
        }
    }

    /// The cached table without touching the filesystem.
    pub fn cached(&self) -> Option<Arc<Table>> {
        self.table.clone()
    }

    pub fn invalidate(&mut self) {
        self.table = None;
        self.source_modified = None;
    }

    /// Drop the cached table and read the source again.
    ///
    /// On failure the cache stays empty; a stale table is never kept around.
    pub fn reload(&mut self) -> Result<Arc<Table>, DataLoadError> {
        self.invalidate();
        let modified = modified_time(&self.path);
        let table = Arc::new(load_table(&self.path)?);
        self.table = Some(Arc::clone(&table));
        self.source_modified = modified;
        Ok(table)
    }

    /// Whether the file on disk differs from the one that was loaded.
    pub fn source_changed(&self) -> bool {
        self.table.is_some() && modified_time(&self.path) != self.source_modified
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
