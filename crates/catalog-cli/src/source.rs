//! CSV-backed row source.
//!
//! The file needs a header row. `product_id` is the only required column;
//! `product_name`, `category_name`, `subcategory_name`, `class_name` and the
//! optional `*_id` columns may be missing or empty.

use std::path::{Path, PathBuf};

use catalog_filter::{RowSource, search};
use catalog_model::{FlatRecord, SourceFetchError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row of the file.
    pub fn read_all(&self) -> Result<Vec<FlatRecord>, SourceFetchError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|error| self.map_error(error))?;

        let mut records = Vec::new();
        for row in reader.deserialize::<FlatRecord>() {
            records.push(row.map_err(|error| self.map_error(error))?);
        }
        debug!(path = %self.path.display(), rows = records.len(), "read catalog rows");
        Ok(records)
    }

    fn map_error(&self, error: csv::Error) -> SourceFetchError {
        if !error.is_io_error() {
            return SourceFetchError::Parse {
                path: self.path.clone(),
                source: Box::new(error),
            };
        }
        match error.into_kind() {
            csv::ErrorKind::Io(source) => SourceFetchError::Io {
                path: self.path.clone(),
                source,
            },
            _ => SourceFetchError::unavailable(format!("cannot read {}", self.path.display())),
        }
    }
}

impl RowSource for CsvRowSource {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<FlatRecord>, SourceFetchError> {
        let records = self.read_all()?;
        Ok(match query {
            Some(query) => search::filter(&records, query),
            None => records,
        })
    }
}
