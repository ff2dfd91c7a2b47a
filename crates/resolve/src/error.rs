//! Resolution Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A resolution error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The pipeline stage that came up empty.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// No search-result article matched the query as a whole word.
    #[display("article")]
    Article,
    /// No part link on the search page had exactly the designator as text.
    #[display("exact transistor")]
    ExactTransistor,
    /// The part page does not advertise a substitution table.
    #[display("substitution link")]
    SubstitutionLink,
}

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller didn't supply a required parameter.
    #[display("missing parameter: {_0}")]
    MissingParameter(#[error(not(source))] &'static str),
    /// A stage of the pipeline found nothing; a valid answer, not a failure.
    #[display("{_0} not found")]
    NotFound(#[error(not(source))] Stage),
    /// A page could not be retrieved.
    #[display("failed to fetch {_0}")]
    Fetch(#[error(not(source))] &'static str),
    /// A page was retrieved, but isn't shaped the way the site layout says.
    #[display("failed to parse {_0}")]
    Parse(#[error(not(source))] &'static str),
    /// The site layout is invalid (bad selector or base URL).
    #[display("invalid site layout")]
    Layout,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
