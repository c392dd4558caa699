//! Card catalog: records, localized text, variant sets and the CSV loader.
//!
//! ## Key Types
//!
//! - `CardRecord`: one catalog entry (number, image, localized text)
//! - `DisplayFields`: per-language text with base-language fallback
//! - `VariantSet`: records sharing a number, in source order
//! - `CardCatalog`: number -> variants lookup table
//! - `CsvLoader`: builds a catalog from CSV

pub mod catalog;
pub mod loader;
pub mod record;

pub use catalog::{CardCatalog, CatalogStats, VariantSet};
pub use loader::CsvLoader;
pub use record::{CardRecord, CardText, DisplayFields, DisplayText, LanguageTag, TextField};
