//! Inventory Error Types

use derive_more::{Display, Error};

/// An inventory error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    #[display("database migration error")]
    Migration,
    #[display("component not found: {_0}")]
    ComponentNotFound(#[error(not(source))] i64),
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    #[display("more than one component has the MPN {_0}")]
    DuplicateMpn(#[error(not(source))] String),
    #[display("insufficient stock of {mpn}: {needed} needed, {available} available")]
    InsufficientStock { mpn: String, needed: u32, available: u32 },
    #[display("component {_0} is used by a project")]
    ComponentInUse(#[error(not(source))] i64),
    #[display("invalid quantity for component {_0}")]
    InvalidQuantity(#[error(not(source))] i64),
    #[display("could not load collation data")]
    Collation,
    /// A stored value doesn't fit its model type.
    #[display("invalid inventory data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // SQLITE_BUSY surfaces as a plain database error.
        matches!(self, Self::Database)
    }

    /// Returns `true` if the request itself was wrong, as opposed to the
    /// store failing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InsufficientStock { .. } | Self::InvalidQuantity(_) | Self::DuplicateMpn(_)
        )
    }
}
