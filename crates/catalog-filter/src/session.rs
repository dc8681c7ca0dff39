//! The host-facing filter session.
//!
//! `FilterSession` owns everything a host needs between events: the last
//! delivered rows, the current query, the built forest, the expansion state
//! and the selection. Hosts call it from their event loop and render from
//! its accessors.
//!
//! # Rebuild flow
//!
//! ```text
//! rows + query -> search::filter -> hierarchy::build -> forest
//!                                                      -> ExpansionState::apply_forest
//! ```
//!
//! Rows arrive through [`FilterSession::begin_fetch`] /
//! [`FilterSession::complete_fetch`]. Results of superseded fetches are
//! dropped without touching any state; failed fetches keep the previous
//! forest. Changing the query supersedes every fetch still in flight.
//!
//! # Row base
//!
//! A fetch issued without a query delivers the full catalog, which is kept
//! as the base every query is filtered from. A fetch issued for a query
//! delivers rows narrowed by the source; those are kept next to the base and
//! only used while that same query is applied, so clearing the search always
//! rebuilds from the full catalog.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;

use catalog_model::{FlatRecord, HierarchyNode, SelectedFilter, SourceFetchError, find_node};
use tracing::{debug, warn};

use crate::config::FilterConfig;
use crate::debounce::QueryDebouncer;
use crate::expansion::ExpansionState;
use crate::fetch::{FetchOutcome, FetchSequencer, FetchTicket};
use crate::search::{self, is_active_query};
use crate::selection::Selection;
use crate::source::RowSource;
use crate::{hierarchy, selection};

/// Callback fired on every selection change.
pub type SelectionListener = Box<dyn FnMut(Option<&SelectedFilter>)>;

pub struct FilterSession {
    config: FilterConfig,
    query: String,
    records: Vec<FlatRecord>,
    /// Rows the source delivered for a specific query.
    narrowed: Option<(String, Vec<FlatRecord>)>,
    forest: Vec<HierarchyNode>,
    expansion: ExpansionState,
    selection: Selection,
    fetches: FetchSequencer,
    debouncer: QueryDebouncer,
    listeners: Vec<SelectionListener>,
}

impl FilterSession {
    /// Create an empty session. The forest stays empty until rows arrive.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            expansion: ExpansionState::new().with_auto_expand(config.auto_expand_on_search),
            debouncer: QueryDebouncer::new(config.debounce_ms),
            config,
            query: String::new(),
            records: Vec::new(),
            narrowed: None,
            forest: Vec::new(),
            selection: Selection::new(),
            fetches: FetchSequencer::new(),
            listeners: Vec::new(),
        }
    }

    /// Create a session over rows that are already loaded.
    pub fn with_records(config: FilterConfig, records: Vec<FlatRecord>) -> Self {
        let mut session = Self::new(config);
        session.records = records;
        session.rebuild();
        session
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The applied query (pending debounced input is not included).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full catalog from the last accepted unfiltered fetch.
    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn forest(&self) -> &[HierarchyNode] {
        &self.forest
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        self.expansion.expanded()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn is_searching(&self) -> bool {
        self.expansion.is_searching()
    }

    pub fn selection(&self) -> Option<&SelectedFilter> {
        self.selection.current()
    }

    /// Register a callback fired on every `select` and `clear_selection`.
    pub fn on_selection_change(&mut self, listener: impl FnMut(Option<&SelectedFilter>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Issue a fetch for the current query. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let query = is_active_query(&self.query).then_some(self.query.as_str());
        let ticket = self.fetches.issue(query);
        debug!(seq = ticket.seq(), query = ticket.query(), "issued row fetch");
        ticket
    }

    /// Deliver the result of a fetch.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<FlatRecord>, SourceFetchError>,
    ) -> FetchOutcome {
        if self.fetches.is_stale(ticket) {
            debug!(seq = ticket.seq(), "discarding stale row fetch");
            return FetchOutcome::Stale;
        }
        match result {
            Ok(records) => {
                let count = records.len();
                match ticket.query() {
                    Some(query) => self.narrowed = Some((query.to_string(), records)),
                    None => {
                        self.records = records;
                        self.narrowed = None;
                    }
                }
                self.rebuild();
                FetchOutcome::Applied { records: count }
            }
            Err(error) => {
                warn!(seq = ticket.seq(), %error, "row fetch failed, keeping previous tree");
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch from `source` synchronously and apply the result.
    ///
    /// A source failure is reported as [`FetchOutcome::Failed`]; use
    /// [`Self::try_refresh`] to get at the error itself.
    pub fn refresh(&mut self, source: &dyn RowSource) -> FetchOutcome {
        self.try_refresh(source).unwrap_or(FetchOutcome::Failed)
    }

    /// Fetch from `source` synchronously, returning the source error on failure.
    ///
    /// State is left untouched when the source fails.
    pub fn try_refresh(
        &mut self,
        source: &dyn RowSource,
    ) -> Result<FetchOutcome, SourceFetchError> {
        let ticket = self.begin_fetch();
        match source.fetch(ticket.query()) {
            Ok(records) => Ok(self.complete_fetch(&ticket, Ok(records))),
            Err(error) => {
                warn!(seq = ticket.seq(), %error, "row fetch failed, keeping previous tree");
                Err(error)
            }
        }
    }

    /// Record typed input. It is applied by [`Self::poll_debounce`] once idle.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.debouncer.note_input(query, now);
    }

    /// Apply pending input if the debounce delay has elapsed.
    ///
    /// Returns true when the tree was rebuilt.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.apply_query(query);
                true
            }
            None => false,
        }
    }

    /// Apply a query immediately, bypassing the debounce.
    ///
    /// A changed query supersedes any fetch still in flight.
    pub fn apply_query(&mut self, query: impl Into<String>) {
        self.debouncer.flush();
        let query = query.into();
        if query != self.query {
            self.fetches.supersede();
            debug!(from = %self.query, to = %query, "query changed, superseding pending fetches");
        }
        self.query = query;
        self.rebuild();
    }

    /// Flip the expansion of a node. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.expansion.toggle(id)
    }

    /// Select `node` and notify listeners.
    pub fn select(&mut self, node: &HierarchyNode) -> SelectedFilter {
        let filter = self.selection.select(node).clone();
        self.notify();
        filter
    }

    /// Select the node with `id` in the current forest.
    ///
    /// Returns `None` and leaves the selection alone when the id is unknown.
    pub fn select_id(&mut self, id: &str) -> Option<SelectedFilter> {
        let filter = selection::select(find_node(&self.forest, id)?);
        let filter = self.selection.set(filter).clone();
        self.notify();
        Some(filter)
    }

    /// Clear the selection and notify listeners.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify();
    }

    pub fn is_selected(&self, node: &HierarchyNode) -> bool {
        self.selection.is_selected(node)
    }

    fn rebuild(&mut self) {
        let base = match &self.narrowed {
            Some((query, rows)) if is_active_query(&self.query) && *query == self.query => rows,
            _ => &self.records,
        };
        let visible = search::filter(base, &self.query);
        self.forest = hierarchy::build(&visible, self.config.levels);
        self.expansion.apply_forest(&self.forest, &self.query);
        debug!(
            query = %self.query,
            matched = visible.len(),
            total = base.len(),
            "rebuilt catalog forest"
        );
    }

    fn notify(&mut self) {
        let current = self.selection.current();
        for listener in &mut self.listeners {
            listener(current);
        }
    }
}

impl fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSession")
            .field("config", &self.config)
            .field("query", &self.query)
            .field("records", &self.records.len())
            .field("roots", &self.forest.len())
            .field("expansion", &self.expansion)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::source::MemoryRowSource;

    fn records() -> Vec<FlatRecord> {
        vec![
            FlatRecord::new("P1", "Cola", "Beverages").with_subcategory("Soda"),
            FlatRecord::new("P2", "Lemon Soda", "Beverages").with_subcategory("Soda"),
            FlatRecord::new("P3", "Chips", "Snacks"),
        ]
    }

    #[test]
    fn stale_fetch_does_not_touch_state() {
        let mut session = FilterSession::new(FilterConfig::default());
        let older = session.begin_fetch();
        let newer = session.begin_fetch();

        assert_eq!(
            session.complete_fetch(&newer, Ok(records())),
            FetchOutcome::Applied { records: 3 }
        );
        assert_eq!(
            session.complete_fetch(&older, Ok(vec![FlatRecord::new("X", "Other", "Other")])),
            FetchOutcome::Stale
        );
        assert_eq!(session.records().len(), 3);
        assert_eq!(session.forest().len(), 2);
    }

    #[test]
    fn failed_fetch_keeps_previous_tree_and_selection() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        session.select_id("c:Snacks").expect("snacks exists");

        let ticket = session.begin_fetch();
        let outcome =
            session.complete_fetch(&ticket, Err(SourceFetchError::unavailable("timeout")));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(session.forest().len(), 2);
        assert_eq!(
            session.selection().map(|s| s.category_name.as_str()),
            Some("Snacks")
        );
    }

    #[test]
    fn listeners_see_select_and_clear() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        let sink = Rc::clone(&seen);
        session.on_selection_change(move |filter| {
            sink.borrow_mut()
                .push(filter.map(|f| f.category_name.clone()));
        });

        session.select_id("c:Beverages");
        session.clear_selection();
        assert!(session.select_id("c:Missing").is_none());

        assert_eq!(
            *seen.borrow(),
            vec![Some("Beverages".to_string()), None]
        );
    }

    #[test]
    fn selection_survives_rebuild() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        session.select_id("c:Beverages/s:Soda/p:P1");

        session.apply_query("cola");
        let cola = find_node(session.forest(), "c:Beverages/s:Soda/p:P1").unwrap();
        assert!(session.is_selected(cola));
    }

    #[test]
    fn debounced_query_applies_once_idle() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        let start = Instant::now();
        session.set_query("ch", start);
        session.set_query("chips", start + Duration::from_millis(100));

        assert!(!session.poll_debounce(start + Duration::from_millis(300)));
        assert_eq!(session.query(), "");
        assert!(session.poll_debounce(start + Duration::from_millis(400)));
        assert_eq!(session.query(), "chips");
        assert_eq!(session.forest().len(), 1);
        assert!(session.is_searching());
    }

    #[test]
    fn search_round_trip_restores_expansion() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        session.toggle("c:Beverages");

        session.apply_query("soda");
        assert!(session.is_expanded("c:Beverages/s:Soda"));
        session.toggle("c:Beverages/s:Soda");

        session.apply_query("");
        assert_eq!(
            session.expanded().iter().collect::<Vec<_>>(),
            vec!["c:Beverages"]
        );
    }

    #[test]
    fn refresh_passes_active_query_to_source() {
        let source = MemoryRowSource::new(records());
        let mut session = FilterSession::new(FilterConfig::default());
        session.apply_query("chips");

        assert_eq!(
            session.refresh(&source),
            FetchOutcome::Applied { records: 1 }
        );
        assert_eq!(session.forest()[0].name, "Snacks");
    }

    fn root_names(session: &FilterSession) -> Vec<&str> {
        session.forest().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn clearing_search_after_narrowed_refresh_shows_full_catalog() {
        let source = MemoryRowSource::new(records());
        let mut session = FilterSession::new(FilterConfig::default());
        assert_eq!(
            session.refresh(&source),
            FetchOutcome::Applied { records: 3 }
        );

        session.apply_query("chips");
        assert_eq!(
            session.refresh(&source),
            FetchOutcome::Applied { records: 1 }
        );
        assert_eq!(root_names(&session), vec!["Snacks"]);

        session.apply_query("");
        assert_eq!(root_names(&session), vec!["Beverages", "Snacks"]);
        assert_eq!(session.records().len(), 3);
    }

    #[test]
    fn query_change_supersedes_in_flight_fetch() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        session.apply_query("chips");
        let ticket = session.begin_fetch();
        session.apply_query("");

        let outcome =
            session.complete_fetch(&ticket, Ok(vec![FlatRecord::new("P3", "Chips", "Snacks")]));

        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(!session.is_searching());
        assert_eq!(root_names(&session), vec!["Beverages", "Snacks"]);
    }

    #[test]
    fn unchanged_query_keeps_in_flight_fetch_current() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());
        session.apply_query("chips");
        let ticket = session.begin_fetch();
        session.apply_query("chips");

        assert_eq!(
            session.complete_fetch(&ticket, Ok(vec![FlatRecord::new("P3", "Chips", "Snacks")])),
            FetchOutcome::Applied { records: 1 }
        );
    }

    struct DownSource;

    impl RowSource for DownSource {
        fn fetch(&self, _query: Option<&str>) -> Result<Vec<FlatRecord>, SourceFetchError> {
            Err(SourceFetchError::unavailable("connection refused"))
        }
    }

    #[test]
    fn try_refresh_returns_source_error() {
        let mut session = FilterSession::with_records(FilterConfig::default(), records());

        let err = session.try_refresh(&DownSource).unwrap_err();
        assert!(matches!(err, SourceFetchError::Unavailable { .. }));
        assert!(err.user_message().contains("unavailable"));
        assert_eq!(session.forest().len(), 2);
        assert_eq!(session.refresh(&DownSource), FetchOutcome::Failed);
    }
}
