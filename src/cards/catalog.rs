//! The card catalog: number -> variants lookup table.
//!
//! Built once (normally from CSV, see `CsvLoader`) and then only read.
//! A number may have several records ("variants"); they keep insertion
//! order, and the first one is the default.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CardNumber, CatalogError};

use super::loader::CsvLoader;
use super::record::CardRecord;

/// Records sharing one card number, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSet(Vec<CardRecord>);

static EMPTY_VARIANTS: VariantSet = VariantSet(Vec::new());

impl VariantSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CardRecord) {
        self.0.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The default variant.
    #[must_use]
    pub fn first(&self) -> Option<&CardRecord> {
        self.0.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CardRecord> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardRecord> {
        self.0.iter()
    }

    /// First variant whose file basename matches `name`.
    #[must_use]
    pub fn find_by_filename(&self, name: &str) -> Option<&CardRecord> {
        self.0.iter().find(|r| r.matches_filename(name))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CardRecord] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<CardRecord> {
        self.0
    }
}

impl From<Vec<CardRecord>> for VariantSet {
    fn from(records: Vec<CardRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<CardRecord> for VariantSet {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a CardRecord;
    type IntoIter = std::slice::Iter<'a, CardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Size summary of a catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Distinct card numbers.
    pub numbers: usize,
    /// Records across all numbers.
    pub total: usize,
}

/// In-memory card catalog.
///
/// ## Example
///
/// ```
/// use card_keypad::cards::{CardCatalog, CardRecord};
/// use card_keypad::core::CardNumber;
///
/// let twelve = CardNumber::new(12).unwrap();
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardRecord::new(twelve, "012a.png"));
/// catalog.insert(CardRecord::new(twelve, "012b.png"));
///
/// assert_eq!(catalog.variants(twelve).len(), 2);
/// assert!(catalog.variants(CardNumber::new(13).unwrap()).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    by_number: FxHashMap<CardNumber, VariantSet>,
    total: usize,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a CSV file with the default loader.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        CsvLoader::new().load_path(path)
    }

    /// Load a catalog from CSV data with the default loader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        CsvLoader::new().load_reader(reader)
    }

    /// Append a record after any existing variants of its number.
    pub fn insert(&mut self, record: CardRecord) {
        self.by_number.entry(record.number).or_default().push(record);
        self.total += 1;
    }

    /// All variants for a number; empty when there are none.
    #[must_use]
    pub fn variants(&self, number: CardNumber) -> &VariantSet {
        self.by_number.get(&number).unwrap_or(&EMPTY_VARIANTS)
    }

    /// Check if any record has this number.
    #[must_use]
    pub fn contains(&self, number: CardNumber) -> bool {
        self.by_number.contains_key(&number)
    }

    /// Distinct numbers, ascending.
    #[must_use]
    pub fn numbers(&self) -> Vec<CardNumber> {
        let mut numbers: Vec<_> = self.by_number.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            numbers: self.by_number.len(),
            total: self.total,
        }
    }
}

impl FromIterator<CardRecord> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: u32) -> CardNumber {
        CardNumber::new(n).unwrap()
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut catalog = CardCatalog::new();
        catalog.insert(CardRecord::new(number(12), "012a.png"));
        catalog.insert(CardRecord::new(number(5), "005.png"));
        catalog.insert(CardRecord::new(number(12), "012b.png"));

        let twelve = catalog.variants(number(12));
        assert_eq!(twelve.len(), 2);
        assert_eq!(twelve.first().unwrap().filename, "012a.png");
        assert_eq!(twelve.get(1).unwrap().filename, "012b.png");
    }

    #[test]
    fn test_stats() {
        let catalog: CardCatalog = vec![
            CardRecord::new(number(1), "a.png"),
            CardRecord::new(number(1), "b.png"),
            CardRecord::new(number(2), "c.png"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.stats(), CatalogStats { numbers: 2, total: 3 });
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.numbers(), vec![number(1), number(2)]);
    }

    #[test]
    fn test_missing_number_is_empty() {
        let catalog = CardCatalog::new();
        assert!(catalog.variants(number(7)).is_empty());
        assert!(!catalog.contains(number(7)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_find_by_filename() {
        let variants: VariantSet = vec![
            CardRecord::new(number(12), "./x/012a.png"),
            CardRecord::new(number(12), "./x/012b.png"),
        ]
        .into();

        let found = variants.find_by_filename("012b.png").unwrap();
        assert_eq!(found.filename, "x/012b.png");
        assert!(variants.find_by_filename("013.png").is_none());
    }

    #[test]
    fn test_variant_set_serializes_as_array() {
        let variants: VariantSet = vec![CardRecord::new(number(1), "a.png")].into();
        let json = serde_json::to_value(&variants).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["number"], 1);
    }
}
