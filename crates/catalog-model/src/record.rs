//! Flat catalog rows as delivered by a row source.

use serde::{Deserialize, Serialize};

/// Name given to category nodes whose row has no category name.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One denormalized catalog row: a product and its ancestor chain.
///
/// Intermediate fields may be missing. Blank strings are treated the same as
/// absent values by every accessor below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Backend identifier of the category, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

impl FlatRecord {
    /// Create a row with a product and its category.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            category_name: category_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_subcategory(mut self, name: impl Into<String>) -> Self {
        self.subcategory_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Attach backend identifiers for the category, subcategory and class.
    #[must_use]
    pub fn with_ids(
        mut self,
        category_id: Option<&str>,
        subcategory_id: Option<&str>,
        class_id: Option<&str>,
    ) -> Self {
        self.category_id = category_id.map(str::to_string);
        self.subcategory_id = subcategory_id.map(str::to_string);
        self.class_id = class_id.map(str::to_string);
        self
    }

    /// Category display name, or [`UNCATEGORIZED`] when blank.
    pub fn category(&self) -> &str {
        non_blank(Some(&self.category_name)).unwrap_or(UNCATEGORIZED)
    }

    /// Category identifier, falling back to the display name.
    pub fn category_key(&self) -> &str {
        non_blank(self.category_id.as_ref()).unwrap_or_else(|| self.category())
    }

    pub fn subcategory(&self) -> Option<&str> {
        non_blank(self.subcategory_name.as_ref())
    }

    /// Subcategory identifier, falling back to the display name.
    pub fn subcategory_key(&self) -> Option<&str> {
        let name = self.subcategory()?;
        Some(non_blank(self.subcategory_id.as_ref()).unwrap_or(name))
    }

    pub fn class(&self) -> Option<&str> {
        non_blank(self.class_name.as_ref())
    }

    /// Class identifier, falling back to the display name.
    pub fn class_key(&self) -> Option<&str> {
        let name = self.class()?;
        Some(non_blank(self.class_id.as_ref()).unwrap_or(name))
    }

    pub fn product_id(&self) -> &str {
        self.product_id.trim()
    }

    pub fn product_name(&self) -> &str {
        self.product_name.trim()
    }

    /// The five text fields free-text search looks at.
    pub fn search_fields(&self) -> [&str; 5] {
        [
            self.product_id.as_str(),
            self.product_name.as_str(),
            self.category_name.as_str(),
            self.subcategory_name.as_deref().unwrap_or_default(),
            self.class_name.as_deref().unwrap_or_default(),
        ]
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}
