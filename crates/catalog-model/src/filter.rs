//! The canonical "what is selected" value handed to downstream queries.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// A level-bounded selection.
///
/// Fields deeper than `level` are always `None`, even when the selected node
/// knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFilter {
    pub level: Level,
    pub category_id: String,
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl SelectedFilter {
    /// Short human-readable description, e.g. `product Beverages > Soda > P1`.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.category_name.as_str()];
        parts.extend(self.subcategory_name.as_deref());
        parts.extend(self.class_name.as_deref());
        parts.extend(self.product_id.as_deref());
        format!("{} {}", self.level, parts.join(" > "))
    }
}
