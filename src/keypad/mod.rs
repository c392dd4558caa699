//! Keypad input resolution.
//!
//! Turns a stream of key events into catalog lookups:
//!
//! - one digit: shown as `d__`
//! - two digits: shown as `dd_`, auto-resolved after the commit delay
//! - three digits: resolved at once (`OutOfRange` above 499)
//! - `Enter` resolves whatever is typed, `Backspace` removes a digit (or
//!   the committed number), `Escape` resets everything
//!
//! A lookup with several variants opens a chooser; the number is only
//! committed once a variant is picked.
//!
//! ## Key Types
//!
//! - `InputResolver`: the state machine
//! - `EntryState`: buffer, committed number, timer, open chooser, error
//! - `CommitTimer`: cancellable one-shot timer bookkeeping
//! - `Step`: work the driver must do after an operation

mod entry;
mod resolver;
mod timer;

pub use entry::{EntryBuffer, EntryMode, EntryState, PAD_CHAR};
pub use resolver::{InputResolver, LookupTicket, Step};
pub use timer::{CommitTimer, TimerToken};

use serde::{Deserialize, Serialize};

use crate::core::Digit;

/// A physical or on-screen key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEvent {
    /// `0`-`9`: append.
    Digit(Digit),
    /// Remove the last digit.
    Backspace,
    /// Clear everything.
    Escape,
    /// Resolve the buffer now.
    Enter,
}

impl KeyEvent {
    /// Map a key name as reported by keyboards and browsers
    /// (`"7"`, `"Backspace"`, `"Escape"`, `"Enter"`).
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Backspace" => Some(KeyEvent::Backspace),
            "Escape" | "Esc" => Some(KeyEvent::Escape),
            "Enter" => Some(KeyEvent::Enter),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Digit::from_char(c).map(KeyEvent::Digit),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(
            KeyEvent::from_key_name("7"),
            Some(KeyEvent::Digit(Digit::new(7).unwrap()))
        );
        assert_eq!(KeyEvent::from_key_name("Backspace"), Some(KeyEvent::Backspace));
        assert_eq!(KeyEvent::from_key_name("Escape"), Some(KeyEvent::Escape));
        assert_eq!(KeyEvent::from_key_name("Enter"), Some(KeyEvent::Enter));
        assert_eq!(KeyEvent::from_key_name("77"), None);
        assert_eq!(KeyEvent::from_key_name("a"), None);
        assert_eq!(KeyEvent::from_key_name(""), None);
    }
}
