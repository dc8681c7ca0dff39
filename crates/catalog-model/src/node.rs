//! Hierarchy nodes produced by the tree builder.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Snapshot of the ancestor chain of a node.
///
/// Only fields at or above the owning node's level are meaningful; the
/// builder never fills deeper ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub category_id: String,
    pub category_name: String,
    pub subcategory_id: Option<String>,
    pub subcategory_name: Option<String>,
    pub class_id: Option<String>,
    pub class_name: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
}

/// A node in a built catalog forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Deterministic id, unique within one forest.
    pub id: String,
    /// Display name.
    pub name: String,
    pub level: Level,
    /// Children in first-seen input order.
    pub children: Vec<HierarchyNode>,
    pub data: NodeData,
}

impl HierarchyNode {
    pub fn new(id: String, name: String, level: Level, data: NodeData) -> Self {
        Self {
            id,
            name,
            level,
            children: Vec::new(),
            data,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Visit this node and all descendants depth-first, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a HierarchyNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Find a descendant (or this node) by id.
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Find a node anywhere in a forest by id.
pub fn find_node<'a>(forest: &'a [HierarchyNode], id: &str) -> Option<&'a HierarchyNode> {
    forest.iter().find_map(|root| root.find(id))
}

/// All node ids of a forest in depth-first order.
pub fn node_ids(forest: &[HierarchyNode]) -> Vec<String> {
    let mut ids = Vec::new();
    for root in forest {
        root.walk(&mut |node| ids.push(node.id.clone()));
    }
    ids
}

/// Number of leaf nodes in a forest.
pub fn leaf_count(forest: &[HierarchyNode]) -> usize {
    let mut count = 0;
    for root in forest {
        root.walk(&mut |node| {
            if node.is_leaf() {
                count += 1;
            }
        });
    }
    count
}
