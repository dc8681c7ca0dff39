//! Free-text search over flat catalog rows.

use catalog_model::FlatRecord;

/// Returns true when `query` starts a search session (non-blank).
#[inline]
pub fn is_active_query(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Keep the rows matching `query`, in input order.
///
/// A blank query keeps every row.
pub fn filter(records: &[FlatRecord], query: &str) -> Vec<FlatRecord> {
    match QueryMatcher::new(query) {
        Some(matcher) => records
            .iter()
            .filter(|record| matcher.matches(record))
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

/// A prepared, non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatcher {
    needle: String,
    /// Canonical decimal form when the query is a pure number.
    numeric: Option<String>,
}

impl QueryMatcher {
    /// Prepare `query` for matching. Returns `None` for a blank query.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
            numeric: canonical_number(trimmed),
        })
    }

    /// Case-insensitive substring match against any of the row's five text
    /// fields. A numeric query also accepts a numerically equal product id.
    pub fn matches(&self, record: &FlatRecord) -> bool {
        let substring = record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle));
        substring || self.matches_product_number(record)
    }

    fn matches_product_number(&self, record: &FlatRecord) -> bool {
        self.numeric
            .as_ref()
            .is_some_and(|number| canonical_number(record.product_id()).as_ref() == Some(number))
    }
}

/// Canonical form of a pure decimal number (`007` and `7.0` both become `7`).
///
/// Only ASCII digits with at most one decimal point qualify; signs,
/// exponents and words like `inf` do not.
fn canonical_number(raw: &str) -> Option<String> {
    let (int, frac) = raw.split_once('.').unwrap_or((raw, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int.len() + frac.len() == 0 || !digits(int) || !digits(frac) {
        return None;
    }
    let int = int.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let frac = frac.trim_end_matches('0');
    Some(if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    })
}
