//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configured CSS selector does not parse.
    #[display("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector exactly as configured.
        selector: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A URL (configured base or scraped link) could not be parsed.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The search query is empty after trimming.
    #[display("empty query")]
    EmptyQuery,
    /// The query could not be turned into a search pattern.
    #[display("invalid search pattern for query: {_0}")]
    InvalidPattern(#[error(not(source))] String),
    /// An element was found, but lacks an attribute the pipeline needs.
    #[display("matched <{element}> has no '{attribute}' attribute")]
    MissingAttribute {
        /// The element (or role) that was matched.
        element: &'static str,
        /// The attribute that was expected on it.
        attribute: &'static str,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Markup and configuration either parse or they don't.
        false
    }
}
