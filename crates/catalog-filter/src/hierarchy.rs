//! Flat rows to a navigable category tree.
//!
//! The builder makes a single pass over the rows. It keeps one key map per
//! level so that every category, subcategory and class is created once and
//! then reused. Nodes live in an arena while the pass runs and are assembled
//! into owned trees at the end.
//!
//! Missing intermediate fields never drop a row: a product whose row has no
//! subcategory attaches to its category, and so on. Product rows without an
//! id are keyed by their row position, so they never merge with each other.

use std::collections::HashMap;

use catalog_model::{FlatRecord, HierarchyNode, Level, LevelSet, NodeData};
use tracing::{debug, trace};

/// Name used for product rows with neither an id nor a name.
const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Build the catalog forest for `records` restricted to `levels`.
///
/// Roots and children keep first-seen order. Node ids are derived from the
/// ancestor chain, so identical input always yields identical ids.
pub fn build(records: &[FlatRecord], levels: LevelSet) -> Vec<HierarchyNode> {
    let mut builder = ForestBuilder::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        builder.insert(row, record, levels);
    }
    let forest = builder.finish();
    debug!(
        records = records.len(),
        roots = forest.len(),
        levels = %levels,
        "built catalog hierarchy"
    );
    forest
}

struct Slot {
    node: HierarchyNode,
    children: Vec<usize>,
}

struct ForestBuilder {
    arena: Vec<Slot>,
    roots: Vec<usize>,
    /// Composite key -> arena index, one map per level.
    keys: [HashMap<String, usize>; 4],
}

impl ForestBuilder {
    fn with_capacity(records: usize) -> Self {
        Self {
            arena: Vec::with_capacity(records),
            roots: Vec::new(),
            keys: Default::default(),
        }
    }

    fn insert(&mut self, row: usize, record: &FlatRecord, levels: LevelSet) {
        let category_key = record.category_key();
        let mut parent = self.resolve(None, Level::Category, &escape_key(category_key), || {
            (
                record.category().to_string(),
                NodeData {
                    category_id: category_key.to_string(),
                    category_name: record.category().to_string(),
                    ..NodeData::default()
                },
            )
        });

        if levels.contains(Level::Subcategory)
            && let (Some(name), Some(key)) = (record.subcategory(), record.subcategory_key())
        {
            let mut data = self.arena[parent].node.data.clone();
            parent = self.resolve(Some(parent), Level::Subcategory, &escape_key(key), || {
                data.subcategory_id = Some(key.to_string());
                data.subcategory_name = Some(name.to_string());
                (name.to_string(), data)
            });
        }

        if levels.contains(Level::Class)
            && let (Some(name), Some(key)) = (record.class(), record.class_key())
        {
            let mut data = self.arena[parent].node.data.clone();
            parent = self.resolve(Some(parent), Level::Class, &escape_key(key), || {
                data.class_id = Some(key.to_string());
                data.class_name = Some(name.to_string());
                (name.to_string(), data)
            });
        }

        if levels.contains(Level::Product) {
            let product_id = record.product_id();
            let segment = if product_id.is_empty() {
                debug!(row, "product row without id, keyed by row position");
                format!("#{row}")
            } else {
                escape_key(product_id)
            };
            let data_id = if product_id.is_empty() {
                segment.as_str()
            } else {
                product_id
            };
            let before = self.arena.len();
            let mut data = self.arena[parent].node.data.clone();
            self.resolve(Some(parent), Level::Product, &segment, || {
                data.product_id = Some(data_id.to_string());
                data.product_name = Some(record.product_name().to_string());
                (product_label(product_id, record.product_name()), data)
            });
            if self.arena.len() == before {
                trace!(product_id, "duplicate product row under the same parent, keeping first");
            }
        }
    }

    /// Look up the node for the id segment `segment` under `parent`, creating
    /// it on first sight.
    fn resolve(
        &mut self,
        parent: Option<usize>,
        level: Level,
        segment: &str,
        make: impl FnOnce() -> (String, NodeData),
    ) -> usize {
        let parent_id = parent.map(|idx| self.arena[idx].node.id.as_str());
        let id = child_id(parent_id, level, segment);
        if let Some(&idx) = self.keys[level as usize].get(&id) {
            return idx;
        }

        let (name, data) = make();
        let idx = self.arena.len();
        self.arena.push(Slot {
            node: HierarchyNode::new(id.clone(), name, level, data),
            children: Vec::new(),
        });
        self.keys[level as usize].insert(id, idx);
        match parent {
            Some(parent) => self.arena[parent].children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    /// Assemble owned trees. A child is always pushed after its parent, so
    /// walking the arena backwards sees every subtree complete before its
    /// parent claims it.
    fn finish(self) -> Vec<HierarchyNode> {
        let mut built: Vec<Option<HierarchyNode>> = Vec::with_capacity(self.arena.len());
        built.resize_with(self.arena.len(), || None);

        for (idx, slot) in self.arena.into_iter().enumerate().rev() {
            let mut node = slot.node;
            node.children = slot
                .children
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            built[idx] = Some(node);
        }

        self.roots
            .iter()
            .filter_map(|root| built[*root].take())
            .collect()
    }
}

/// Escape a key for use as an id segment.
///
/// `/` separates path segments and a leading `#` marks positional product
/// keys, so both are percent-escaped.
fn escape_key(key: &str) -> String {
    key.replace('%', "%25")
        .replace('/', "%2F")
        .replace('#', "%23")
}

/// Compose a node id from the parent id and an escaped segment.
fn child_id(parent: Option<&str>, level: Level, segment: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}/{}:{segment}", level.tag()),
        None => format!("{}:{segment}", level.tag()),
    }
}

fn product_label(product_id: &str, product_name: &str) -> String {
    match (product_id.is_empty(), product_name.is_empty()) {
        (false, false) => format!("{product_id} - {product_name}"),
        (false, true) => product_id.to_string(),
        (true, false) => product_name.to_string(),
        (true, true) => UNNAMED_PRODUCT.to_string(),
    }
}
