//! Core types: card numbers, keypad digits, configuration, errors.
//!
//! Everything here is independent of where cards come from and how they
//! are shown; the catalog, keypad and server modules build on it.

pub mod config;
pub mod error;
pub mod number;

pub use config::{KeypadConfig, ServerConfig};
pub use error::{CatalogError, EntryError, ErrorKind, LookupError};
pub use number::{CardNumber, Digit, NumberError};
