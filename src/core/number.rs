//! Card numbers and keypad digits.
//!
//! Every catalog entry is addressed by a `CardNumber` in `0..=499`.
//! Numbers are always shown zero-padded to three characters, which is
//! also the width of the keypad display.
//!
//! ## Usage
//!
//! ```
//! use card_keypad::core::CardNumber;
//!
//! let n = CardNumber::parse_entry("038").unwrap();
//! assert_eq!(n.raw(), 38);
//! assert_eq!(n.padded(), "038");
//!
//! assert!(CardNumber::new(500).is_none());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Addressable number of a catalog card.
///
/// Construction is checked: a `CardNumber` always lies in
/// `CardNumber::MIN..=CardNumber::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CardNumber(u16);

impl CardNumber {
    /// Smallest addressable number.
    pub const MIN: u32 = 0;

    /// Largest addressable number.
    pub const MAX: u32 = 499;

    /// Width of the zero-padded display form.
    pub const WIDTH: usize = 3;

    /// Create a card number, returning `None` when out of range.
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        if n <= Self::MAX {
            Some(Self(n as u16))
        } else {
            None
        }
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0 as u32
    }

    /// Zero-padded three character form (`5` -> `"005"`).
    #[must_use]
    pub fn padded(self) -> String {
        format!("{:0width$}", self.0, width = Self::WIDTH)
    }

    /// Parse a user or URL supplied entry.
    ///
    /// Surrounding whitespace and leading zeros are stripped before
    /// parsing, so `"038"` is 38 and `"000"` (or an empty string) is 0.
    pub fn parse_entry(raw: &str) -> Result<Self, NumberError> {
        let value = parse_digits(raw)?;
        Self::new(value).ok_or(NumberError::OutOfRange(value))
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<u32> for CardNumber {
    type Error = NumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NumberError::OutOfRange(value))
    }
}

impl From<CardNumber> for u32 {
    fn from(n: CardNumber) -> Self {
        n.raw()
    }
}

/// Failure to turn text into a `CardNumber`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NumberError {
    /// Not a non-negative decimal integer.
    #[error("'{0}' is not a card number")]
    Malformed(String),

    /// A valid integer outside `0..=499`.
    #[error("{0} is outside 000-499")]
    OutOfRange(u32),
}

/// Strip whitespace and leading zeros, then parse the remaining digits.
fn parse_digits(raw: &str) -> Result<u32, NumberError> {
    let trimmed = raw.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(NumberError::Malformed(raw.to_string()));
    }

    let significant = trimmed.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }

    // Anything this long is far past MAX; report it as out of range rather
    // than overflowing u32.
    if significant.len() > 9 {
        return Err(NumberError::OutOfRange(u32::MAX));
    }

    significant
        .parse()
        .map_err(|_| NumberError::Malformed(raw.to_string()))
}

/// A single keypad digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit from its numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a digit from its ASCII character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self(c as u8 - b'0')),
            _ => None,
        }
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for display.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<char> for Digit {
    type Error = NumberError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| NumberError::Malformed(c.to_string()))
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_range() {
        assert_eq!(CardNumber::new(0).map(CardNumber::raw), Some(0));
        assert_eq!(CardNumber::new(499).map(CardNumber::raw), Some(499));
        assert!(CardNumber::new(500).is_none());
    }

    #[test]
    fn test_padded() {
        let n = CardNumber::new(5).unwrap();
        assert_eq!(n.padded(), "005");
        assert_eq!(format!("{}", n), "005");
        assert_eq!(CardNumber::new(123).unwrap().padded(), "123");
    }

    #[test]
    fn test_parse_entry_strips_zeros() {
        assert_eq!(CardNumber::parse_entry("038").unwrap().raw(), 38);
        assert_eq!(CardNumber::parse_entry("000").unwrap().raw(), 0);
        assert_eq!(CardNumber::parse_entry("").unwrap().raw(), 0);
        assert_eq!(CardNumber::parse_entry(" 7 ").unwrap().raw(), 7);
    }

    #[test]
    fn test_parse_entry_rejects() {
        assert_eq!(
            CardNumber::parse_entry("500"),
            Err(NumberError::OutOfRange(500))
        );
        assert!(matches!(
            CardNumber::parse_entry("12a"),
            Err(NumberError::Malformed(_))
        ));
        assert!(matches!(
            CardNumber::parse_entry("-3"),
            Err(NumberError::Malformed(_))
        ));
        assert!(matches!(
            CardNumber::parse_entry("99999999999999"),
            Err(NumberError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_serde_checks_range() {
        let n: CardNumber = serde_json::from_str("12").unwrap();
        assert_eq!(n.raw(), 12);
        assert!(serde_json::from_str::<CardNumber>("500").is_err());
        assert_eq!(serde_json::to_string(&n).unwrap(), "12");
    }

    #[test]
    fn test_digit() {
        let d = Digit::from_char('7').unwrap();
        assert_eq!(d.value(), 7);
        assert_eq!(d.as_char(), '7');
        assert!(Digit::from_char('x').is_none());
        assert!(Digit::new(10).is_none());
        assert!(Digit::try_from('a').is_err());
    }
}
