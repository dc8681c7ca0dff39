//! Which tree nodes are expanded, across search sessions.
//!
//! The state is keyed by node id only, so forests can be rebuilt freely.
//!
//! Search sessions follow two rules:
//!
//! - Entering a search saves the current expanded set once and then expands
//!   every node of each forest built for the search.
//! - Leaving the search restores the saved set verbatim. Toggles made while
//!   searching are discarded.

use std::collections::BTreeSet;

use catalog_model::HierarchyNode;
use tracing::{debug, info};

use crate::search::is_active_query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
    /// Snapshot taken when the current search session started.
    saved: Option<BTreeSet<String>>,
    /// Ids of the most recently applied forest.
    known: BTreeSet<String>,
    auto_expand: bool,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionState {
    pub fn new() -> Self {
        Self {
            expanded: BTreeSet::new(),
            saved: None,
            known: BTreeSet::new(),
            auto_expand: true,
        }
    }

    /// Disable expanding every node on search. Snapshot and restore still apply.
    #[must_use]
    pub fn with_auto_expand(mut self, enabled: bool) -> Self {
        self.auto_expand = enabled;
        self
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    #[inline]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// True while a search session is active.
    #[inline]
    pub fn is_searching(&self) -> bool {
        self.saved.is_some()
    }

    /// Apply a freshly built forest for `query`.
    pub fn apply_forest(&mut self, forest: &[HierarchyNode], query: &str) {
        if is_active_query(query) {
            self.enter_search(forest);
        } else {
            self.exit_search();
            self.remember(forest);
        }
    }

    /// Enter (or stay in) a search session with `forest` as the visible tree.
    pub fn enter_search(&mut self, forest: &[HierarchyNode]) {
        if self.saved.is_none() {
            info!(expanded = self.expanded.len(), "entering search session");
            self.saved = Some(self.expanded.clone());
        }
        self.remember(forest);
        if self.auto_expand {
            self.expanded = self.known.clone();
        }
    }

    /// Leave the search session, restoring the expanded set saved on entry.
    ///
    /// Returns false when no session was active.
    pub fn exit_search(&mut self) -> bool {
        match self.saved.take() {
            Some(saved) => {
                info!(restored = saved.len(), "leaving search session");
                self.expanded = saved;
                true
            }
            None => false,
        }
    }

    /// Flip the expansion of `id`.
    ///
    /// Ids missing from the latest forest are ignored and return false.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.known.contains(id) {
            debug!(id, "ignoring toggle for node not in current forest");
            return false;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
        true
    }

    fn remember(&mut self, forest: &[HierarchyNode]) {
        self.known.clear();
        for root in forest {
            root.walk(&mut |node| {
                self.known.insert(node.id.clone());
            });
        }
    }
}
