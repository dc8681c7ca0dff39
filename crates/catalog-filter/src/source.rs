//! Row sources feeding the filter engine.

use catalog_model::{FlatRecord, SourceFetchError};

use crate::search;

/// Supplies catalog rows, optionally narrowed by a free-text query.
///
/// Implementations own their own transport and timeouts; the engine only
/// sees the rows or the error.
pub trait RowSource {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<FlatRecord>, SourceFetchError>;
}

/// An in-memory row source that applies the query with the search matcher.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    records: Vec<FlatRecord>,
}

impl MemoryRowSource {
    pub fn new(records: Vec<FlatRecord>) -> Self {
        Self { records }
    }
}

impl RowSource for MemoryRowSource {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<FlatRecord>, SourceFetchError> {
        Ok(search::filter(&self.records, query.unwrap_or_default()))
    }
}
