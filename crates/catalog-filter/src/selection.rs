//! Level-exact node selection.
//!
//! A selection remembers the node's level and its ancestor chain down to
//! that level. A node is selected only when it sits at exactly that level
//! with the same chain: choosing a product never marks its category as
//! selected, and choosing a category never marks its products.

use catalog_model::{HierarchyNode, Level, SelectedFilter};

/// Derive the selection value for `node`.
pub fn select(node: &HierarchyNode) -> SelectedFilter {
    let data = &node.data;
    let upto = |level: Level, value: &Option<String>| {
        if node.level >= level {
            value.clone()
        } else {
            None
        }
    };
    SelectedFilter {
        level: node.level,
        category_id: data.category_id.clone(),
        category_name: data.category_name.clone(),
        subcategory_id: upto(Level::Subcategory, &data.subcategory_id),
        subcategory_name: upto(Level::Subcategory, &data.subcategory_name),
        class_id: upto(Level::Class, &data.class_id),
        class_name: upto(Level::Class, &data.class_name),
        product_id: upto(Level::Product, &data.product_id),
        product_name: upto(Level::Product, &data.product_name),
    }
}

/// True when `current` selects exactly `node`.
pub fn is_selected(node: &HierarchyNode, current: Option<&SelectedFilter>) -> bool {
    let Some(current) = current else {
        return false;
    };
    if current.level != node.level {
        return false;
    }
    let data = &node.data;
    let level = node.level;
    data.category_id == current.category_id
        && (level < Level::Subcategory || data.subcategory_id == current.subcategory_id)
        && (level < Level::Class || data.class_id == current.class_id)
        && (level < Level::Product || data.product_id == current.product_id)
}

/// The empty selection.
#[inline]
pub fn clear() -> Option<SelectedFilter> {
    None
}

/// Explicit selection state owned by a host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<SelectedFilter>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SelectedFilter> {
        self.current.as_ref()
    }

    /// Select `node`, replacing any previous selection.
    pub fn select(&mut self, node: &HierarchyNode) -> &SelectedFilter {
        self.set(select(node))
    }

    /// Replace the selection with an already derived filter.
    pub fn set(&mut self, filter: SelectedFilter) -> &SelectedFilter {
        self.current.insert(filter)
    }

    pub fn clear(&mut self) {
        self.current = clear();
    }

    pub fn is_selected(&self, node: &HierarchyNode) -> bool {
        is_selected(node, self.current.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;
    use catalog_model::{FlatRecord, LevelSet, find_node};

    fn forest() -> Vec<HierarchyNode> {
        let records = vec![
            FlatRecord::new("P1", "Cola", "Beverages")
                .with_subcategory("Soda")
                .with_class("Cans"),
            FlatRecord::new("P2", "Water", "Beverages")
                .with_subcategory("Soda")
                .with_class("Bottles"),
            FlatRecord::new("P3", "Chips", "Snacks"),
        ];
        build(&records, LevelSet::all())
    }

    #[test]
    fn select_fills_fields_only_down_to_level() {
        let forest = forest();
        let soda = find_node(&forest, "c:Beverages/s:Soda").unwrap();
        let filter = select(soda);

        assert_eq!(filter.level, Level::Subcategory);
        assert_eq!(filter.subcategory_name.as_deref(), Some("Soda"));
        assert_eq!(filter.class_id, None);
        assert_eq!(filter.product_id, None);
    }

    #[test]
    fn ancestors_and_descendants_are_not_selected() {
        let forest = forest();
        let cans = find_node(&forest, "c:Beverages/s:Soda/k:Cans").unwrap();
        let cola = find_node(&forest, "c:Beverages/s:Soda/k:Cans/p:P1").unwrap();
        let beverages = find_node(&forest, "c:Beverages").unwrap();

        let filter = select(cans);
        assert!(is_selected(cans, Some(&filter)));
        assert!(!is_selected(cola, Some(&filter)));
        assert!(!is_selected(beverages, Some(&filter)));
    }

    #[test]
    fn sibling_class_is_not_selected() {
        let forest = forest();
        let cans = find_node(&forest, "c:Beverages/s:Soda/k:Cans").unwrap();
        let bottles = find_node(&forest, "c:Beverages/s:Soda/k:Bottles").unwrap();

        assert!(!is_selected(bottles, Some(&select(cans))));
    }

    #[test]
    fn product_without_subcategory_matches_itself() {
        let forest = forest();
        let chips = find_node(&forest, "c:Snacks/p:P3").unwrap();
        let filter = select(chips);

        assert_eq!(filter.subcategory_id, None);
        assert!(is_selected(chips, Some(&filter)));
    }

    #[test]
    fn nothing_selected_after_clear() {
        let forest = forest();
        let mut selection = Selection::new();
        selection.select(&forest[0]);
        assert!(selection.is_selected(&forest[0]));

        selection.clear();
        assert!(selection.current().is_none());
        assert!(!selection.is_selected(&forest[0]));
    }
}
