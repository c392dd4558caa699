//! User-facing strings.
//!
//! Every message the presenters show lives in a small per-locale table.
//! Lookups never fail: a message missing from a locale falls back to
//! English. Placeholders are written `{name}` and filled by [`format`].
//!
//! ```
//! use card_keypad::i18n::{format, Locale, Message};
//!
//! let text = format(Locale::Pl, Message::CardPlaceholder, &[("number", "005")]);
//! assert_eq!(text, "Karta 005");
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::LanguageTag;
use crate::core::EntryError;

/// Supported interface locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Polish (default).
    #[default]
    Pl,
}

impl Locale {
    /// Canonical label, also the card language tag for this locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
        }
    }

    /// Parse a locale, tolerating case and region suffixes (`pl-PL`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Locale::En),
            "pl" => Some(Locale::Pl),
            _ => None,
        }
    }

    /// Card text language to prefer for this locale.
    #[must_use]
    pub fn language(self) -> LanguageTag {
        LanguageTag::new(self.as_str())
    }

    /// Raw (unformatted) text of a message.
    #[must_use]
    pub fn text(self, message: Message) -> &'static str {
        match self {
            Locale::Pl => polish(message).unwrap_or_else(|| english(message)),
            Locale::En => english(message),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| format!("unsupported locale '{s}'"))
    }
}

/// Message keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Message {
    InvalidRange,
    OutOfRange,
    NotFound,
    LookupFailed,
    CatalogLoadFailure,
    /// Title used when a card has no title in any language. `{number}`.
    CardPlaceholder,
    /// Chooser tile caption when a variant has no title. `{index}`.
    VariantPlaceholder,
    /// Stand-in for an empty description or instruction.
    EmptyField,
    ChooserTitle,
}

impl Message {
    /// Message shown for an entry error.
    #[must_use]
    pub fn for_error(error: &EntryError) -> Self {
        match error {
            EntryError::InvalidRange { .. } => Message::InvalidRange,
            EntryError::OutOfRange { .. } => Message::OutOfRange,
            EntryError::NotFound { .. } => Message::NotFound,
            EntryError::LookupFailed { .. } => Message::LookupFailed,
            EntryError::CatalogLoadFailure { .. } => Message::CatalogLoadFailure,
        }
    }
}

fn english(message: Message) -> &'static str {
    match message {
        Message::InvalidRange => "Invalid number (0-499).",
        Message::OutOfRange => "Number out of range (000-499).",
        Message::NotFound => "No card for this number.",
        Message::LookupFailed => "Card not found or loading failed.",
        Message::CatalogLoadFailure => "Could not load card data (CSV). Check the file path and name.",
        Message::CardPlaceholder => "Card {number}",
        Message::VariantPlaceholder => "Variant {index}",
        Message::EmptyField => "—",
        Message::ChooserTitle => "Choose a variant",
    }
}

fn polish(message: Message) -> Option<&'static str> {
    let text = match message {
        Message::InvalidRange => "Nieprawidłowy numer (0–499).",
        Message::OutOfRange => "Numer spoza zakresu (000–499).",
        Message::NotFound => "Brak karty dla tego numeru.",
        Message::LookupFailed => "Nie znaleziono karty lub błąd wczytywania.",
        Message::CatalogLoadFailure => {
            "Nie udało się wczytać danych (CSV). Sprawdź ścieżkę i nazwę pliku."
        }
        Message::CardPlaceholder => "Karta {number}",
        Message::VariantPlaceholder => "Wariant {index}",
        Message::ChooserTitle => "Wybierz wariant",
        Message::EmptyField => return None,
    };
    Some(text)
}

/// Render a message with `{name}` placeholders substituted in order.
#[must_use]
pub fn format(locale: Locale, message: Message, args: &[(&str, &str)]) -> String {
    let mut out = locale.text(message).to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Localized text for an entry error.
#[must_use]
pub fn error_text(locale: Locale, error: &EntryError) -> String {
    format(locale, Message::for_error(error), &[])
}
