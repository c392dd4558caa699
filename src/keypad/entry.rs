//! Entry state owned by the keypad resolver.

use smallvec::SmallVec;

use crate::cards::{CardRecord, VariantSet};
use crate::core::{CardNumber, Digit, EntryError};

use super::timer::CommitTimer;

/// Placeholder shown in empty display positions.
pub const PAD_CHAR: char = '_';

/// Up to three typed digits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryBuffer {
    digits: SmallVec<[Digit; 3]>,
}

impl EntryBuffer {
    /// Maximum number of digits.
    pub const CAPACITY: usize = CardNumber::WIDTH;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. The caller resets a full buffer first.
    pub fn push(&mut self, digit: Digit) {
        debug_assert!(!self.is_full(), "entry buffer overflow");
        self.digits.push(digit);
    }

    pub fn pop(&mut self) -> Option<Digit> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= Self::CAPACITY
    }

    /// Decimal value; leading zeros do not matter (`"038"` is 38).
    #[must_use]
    pub fn value(&self) -> u32 {
        self.digits
            .iter()
            .fold(0, |acc, d| acc * 10 + u32::from(d.value()))
    }

    /// The typed digits as text.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.digits.iter().map(|d| d.as_char()).collect()
    }

    /// Display preview, right-padded with `_` to three characters.
    #[must_use]
    pub fn preview(&self) -> String {
        let mut text = self.as_string();
        while text.len() < Self::CAPACITY {
            text.push(PAD_CHAR);
        }
        text
    }
}

/// Coarse state of the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMode {
    /// Nothing typed, nothing committed.
    Empty,
    /// Digits are being typed.
    Entering { digits: usize, timer_armed: bool },
    /// A number was confirmed and is shown.
    Committed(CardNumber),
    /// A variant chooser is open.
    Choosing,
}

/// All mutable keypad state.
///
/// Only the resolver mutates it; everything else reads it through
/// the accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryState {
    pub(crate) buffer: EntryBuffer,
    pub(crate) committed: Option<CardNumber>,
    pub(crate) timer: CommitTimer,
    pub(crate) open_choice: Option<VariantSet>,
    pub(crate) error: Option<EntryError>,
    pub(crate) shown: Option<CardRecord>,
}

impl EntryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    /// The last confirmed number.
    #[must_use]
    pub fn committed(&self) -> Option<CardNumber> {
        self.committed
    }

    /// Zero-padded committed number, as displayed.
    #[must_use]
    pub fn committed_text(&self) -> Option<String> {
        self.committed.map(CardNumber::padded)
    }

    #[must_use]
    pub fn timer(&self) -> &CommitTimer {
        &self.timer
    }

    /// Variants currently offered for a choice.
    #[must_use]
    pub fn open_choice(&self) -> Option<&VariantSet> {
        self.open_choice.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&EntryError> {
        self.error.as_ref()
    }

    /// Record visible in the result view.
    #[must_use]
    pub fn shown(&self) -> Option<&CardRecord> {
        self.shown.as_ref()
    }

    /// Display text: the buffer preview while typing, else the committed
    /// number, else `___`.
    #[must_use]
    pub fn display_text(&self) -> String {
        if !self.buffer.is_empty() {
            return self.buffer.preview();
        }
        match self.committed {
            Some(number) => number.padded(),
            None => self.buffer.preview(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> EntryMode {
        if self.open_choice.is_some() {
            EntryMode::Choosing
        } else if !self.buffer.is_empty() {
            EntryMode::Entering {
                digits: self.buffer.len(),
                timer_armed: self.timer.is_armed(),
            }
        } else if let Some(number) = self.committed {
            EntryMode::Committed(number)
        } else {
            EntryMode::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(text: &str) -> EntryBuffer {
        let mut buffer = EntryBuffer::new();
        for c in text.chars() {
            buffer.push(Digit::from_char(c).unwrap());
        }
        buffer
    }

    #[test]
    fn test_buffer_value() {
        assert_eq!(digits("038").value(), 38);
        assert_eq!(digits("7").value(), 7);
        assert_eq!(digits("").value(), 0);
        assert_eq!(digits("499").value(), 499);
    }

    #[test]
    fn test_buffer_preview() {
        assert_eq!(digits("").preview(), "___");
        assert_eq!(digits("3").preview(), "3__");
        assert_eq!(digits("73").preview(), "73_");
        assert_eq!(digits("012").preview(), "012");
    }

    #[test]
    fn test_buffer_full() {
        let mut buffer = digits("12");
        assert!(!buffer.is_full());
        buffer.push(Digit::new(3).unwrap());
        assert!(buffer.is_full());
        assert_eq!(buffer.pop(), Digit::new(3));
        assert_eq!(buffer.as_string(), "12");
    }

    #[test]
    fn test_display_priority() {
        let mut state = EntryState::new();
        assert_eq!(state.display_text(), "___");
        assert_eq!(state.mode(), EntryMode::Empty);

        state.committed = CardNumber::new(5);
        assert_eq!(state.display_text(), "005");
        assert_eq!(state.mode(), EntryMode::Committed(CardNumber::new(5).unwrap()));

        state.buffer = digits("1");
        assert_eq!(state.display_text(), "1__");
        assert_eq!(
            state.mode(),
            EntryMode::Entering {
                digits: 1,
                timer_armed: false
            }
        );
    }
}
