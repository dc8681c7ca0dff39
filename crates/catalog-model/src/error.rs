//! Error types shared between the filter engine and its row sources.
//!
//! The pure operations of the engine never fail. These errors only describe
//! the outer edges: parsing level names and fetching rows.

use std::path::PathBuf;

use thiserror::Error;

/// An unrecognized level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    #[error("unknown hierarchy level: '{0}' (expected category, subcategory, class or product)")]
    UnknownLevel(String),
}

/// Row source failure.
///
/// The engine treats any of these as an empty delivery and keeps the
/// previously built tree.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    /// The source could not be reached or refused the request.
    #[error("row source unavailable: {reason}")]
    Unavailable { reason: String },

    /// Reading the backing file failed.
    #[error("failed to read rows from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded.
    #[error("failed to parse rows from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceFetchError {
    /// Create an `Unavailable` error from any message.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable { .. } => {
                "The product catalog is currently unavailable. Showing the last loaded data."
                    .to_string()
            }
            Self::Io { path, .. } => {
                format!("Could not read the catalog file at {}", path.display())
            }
            Self::Parse { path, .. } => {
                format!(
                    "The catalog file at {} contains rows that could not be read.",
                    path.display()
                )
            }
        }
    }
}
