//! Hierarchical faceted filter engine for the product catalog.
//!
//! This crate turns flat catalog rows into a category tree, filters it with
//! free-text search, and tracks expansion and selection across rebuilds.
//!
//! # Architecture
//!
//! - `hierarchy` - rows to forest ([`build`])
//! - `search` - free-text row filter ([`filter`])
//! - `selection` - level-exact selection ([`select`], [`is_selected`])
//! - `expansion` - expanded node ids with search save/restore
//! - `debounce` / `fetch` - input debouncing and stale-fetch detection
//! - `session` - [`FilterSession`], the state object hosts drive
//!
//! The first three are pure functions; all mutable state lives in
//! [`ExpansionState`], [`Selection`] and [`FilterSession`].

pub mod config;
pub mod debounce;
pub mod expansion;
pub mod fetch;
pub mod hierarchy;
pub mod search;
pub mod selection;
pub mod session;
pub mod source;

pub use config::{ConfigError, DEFAULT_DEBOUNCE_MS, FilterConfig};
pub use debounce::QueryDebouncer;
pub use expansion::ExpansionState;
pub use fetch::{FetchOutcome, FetchSequencer, FetchTicket};
pub use hierarchy::build;
pub use search::{QueryMatcher, filter, is_active_query};
pub use selection::{Selection, clear, is_selected, select};
pub use session::{FilterSession, SelectionListener};
pub use source::{MemoryRowSource, RowSource};
