//! Data model for the catalog filter engine.
//!
//! - [`FlatRecord`]: one denormalized catalog row
//! - [`Level`] / [`LevelSet`]: hierarchy ranks and the active subset
//! - [`HierarchyNode`]: a node of a built forest
//! - [`SelectedFilter`]: the level-bounded selection value

pub mod error;
pub mod filter;
pub mod level;
pub mod node;
pub mod record;

pub use error::{LevelParseError, SourceFetchError};
pub use filter::SelectedFilter;
pub use level::{Level, LevelSet};
pub use node::{HierarchyNode, NodeData, find_node, leaf_count, node_ids};
pub use record::{FlatRecord, UNCATEGORIZED};
