//! Error taxonomy.
//!
//! - `EntryError`: user-visible errors raised by the keypad resolver.
//!   None of them is fatal except `CatalogLoadFailure`, which only
//!   happens at startup.
//! - `LookupError`: transport failures of a `CardSource`.
//! - `CatalogError`: failures building a catalog from CSV.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CardNumber;

/// Discriminant of an `EntryError`, for presenters and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidRange,
    OutOfRange,
    NotFound,
    LookupFailed,
    CatalogLoadFailure,
}

/// User-visible error raised while resolving keypad input.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EntryError {
    /// A resolve was attempted for a number outside `0..=499`.
    #[error("invalid number {number} (000-499)")]
    InvalidRange { number: u32 },

    /// The third digit produced a number above 499.
    #[error("entry {entry} is out of range (000-499)")]
    OutOfRange { entry: String },

    /// The number is valid but the catalog has no card for it.
    #[error("no card for number {number}")]
    NotFound { number: CardNumber },

    /// The card source could not be reached.
    #[error("lookup of {number} failed: {reason}")]
    LookupFailed { number: CardNumber, reason: String },

    /// The catalog could not be loaded; nothing else is usable.
    #[error("card data could not be loaded: {reason}")]
    CatalogLoadFailure { reason: String },
}

impl EntryError {
    /// The kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EntryError::InvalidRange { .. } => ErrorKind::InvalidRange,
            EntryError::OutOfRange { .. } => ErrorKind::OutOfRange,
            EntryError::NotFound { .. } => ErrorKind::NotFound,
            EntryError::LookupFailed { .. } => ErrorKind::LookupFailed,
            EntryError::CatalogLoadFailure { .. } => ErrorKind::CatalogLoadFailure,
        }
    }
}

/// Failure of a `CardSource` lookup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The source refused the number as malformed.
    #[error("source rejected number {0}")]
    Rejected(CardNumber),

    /// Unexpected response status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Network or decoding failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Failure to build a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no '{0}' column")]
    MissingColumn(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let err = EntryError::NotFound {
            number: CardNumber::new(7).unwrap(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "no card for number 007");

        let err = EntryError::OutOfRange {
            entry: "500".into(),
        };
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::MissingColumn("number");
        assert_eq!(err.to_string(), "CSV has no 'number' column");
    }
}
