//! Card records - the immutable catalog entries.
//!
//! A `CardRecord` carries its number, image reference and localized text.
//! Text is held per language in `DisplayFields`; one language is the base
//! that every other language falls back to.
//!
//! ## Fallback
//!
//! Each of title, description and instruction resolves independently:
//!
//! 1. target language, if non-blank
//! 2. base language, if non-blank
//! 3. a localized placeholder (`"Karta 005"` for titles, `"—"` otherwise)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::CardNumber;
use crate::i18n::{self, Locale, Message};

/// Language of a card text column, such as `en` or `pl`.
///
/// Tags are stored lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Language of unsuffixed CSV columns unless configured otherwise.
    pub const DEFAULT_BASE: &'static str = "en";

    /// Create a tag, normalizing case and whitespace.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase())
    }

    /// The default base language.
    #[must_use]
    pub fn base() -> Self {
        Self::new(Self::DEFAULT_BASE)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the three localized text fields of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Description,
    Instruction,
}

/// Text of a card in a single language. Missing fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl CardText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder pattern). Blank values are ignored.
    #[must_use]
    pub fn with(mut self, field: TextField, value: impl AsRef<str>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, trimming it. Blank values clear the field.
    pub fn set(&mut self, field: TextField, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        let slot = self.slot_mut(field);
        *slot = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }

    /// Get a field.
    #[must_use]
    pub fn get(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Title => self.title.as_deref(),
            TextField::Description => self.description.as_deref(),
            TextField::Instruction => self.instruction.as_deref(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.instruction.is_none()
    }

    fn slot_mut(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::Title => &mut self.title,
            TextField::Description => &mut self.description,
            TextField::Instruction => &mut self.instruction,
        }
    }
}

/// Localized texts of a card, keyed by language, with a base language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    base: LanguageTag,
    texts: BTreeMap<LanguageTag, CardText>,
}

impl Default for DisplayFields {
    fn default() -> Self {
        Self::new(LanguageTag::base())
    }
}

impl DisplayFields {
    #[must_use]
    pub fn new(base: LanguageTag) -> Self {
        Self {
            base,
            texts: BTreeMap::new(),
        }
    }

    /// The base (fallback) language.
    #[must_use]
    pub fn base(&self) -> &LanguageTag {
        &self.base
    }

    /// Replace the text for a language. Empty texts are not stored.
    pub fn insert(&mut self, language: LanguageTag, text: CardText) {
        if text.is_empty() {
            self.texts.remove(&language);
        } else {
            self.texts.insert(language, text);
        }
    }

    /// Set one field for one language.
    pub fn set(&mut self, language: LanguageTag, field: TextField, value: impl AsRef<str>) {
        let mut text = self.texts.remove(&language).unwrap_or_default();
        text.set(field, value);
        self.insert(language, text);
    }

    /// Text stored for exactly this language.
    #[must_use]
    pub fn get(&self, language: &LanguageTag) -> Option<&CardText> {
        self.texts.get(language)
    }

    /// Languages with at least one field.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageTag> {
        self.texts.keys()
    }

    /// Resolve a field: target language, then base language.
    #[must_use]
    pub fn resolve(&self, target: &LanguageTag, field: TextField) -> Option<&str> {
        self.get(target)
            .and_then(|t| t.get(field))
            .or_else(|| self.get(&self.base).and_then(|t| t.get(field)))
    }
}

/// Fully resolved text, ready to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub title: String,
    pub description: String,
    pub instruction: String,
}

/// A catalog entry.
///
/// ## Example
///
/// ```
/// use card_keypad::cards::{CardRecord, CardText, LanguageTag, TextField};
/// use card_keypad::core::CardNumber;
/// use card_keypad::i18n::Locale;
///
/// let card = CardRecord::new(CardNumber::new(5).unwrap(), "./art/005.png")
///     .with_text(LanguageTag::new("en"), CardText::new().with(TextField::Title, "Harbor"))
///     .with_text(LanguageTag::new("pl"), CardText::new().with(TextField::Description, "Port"));
///
/// assert_eq!(card.image_url, "cards/005.png");
///
/// let text = card.display_text(Locale::Pl);
/// assert_eq!(text.title, "Harbor");
/// assert_eq!(text.description, "Port");
/// assert_eq!(text.instruction, "—");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Addressable number.
    pub number: CardNumber,

    /// Source filename, without a leading `./`.
    pub filename: String,

    /// Relative image URL (`cards/<basename>`), empty when there is no file.
    pub image_url: String,

    /// Free-form card type column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    /// Free-form raw text column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// Localized title, description and instruction.
    pub fields: DisplayFields,
}

impl CardRecord {
    /// Create a record with no text. The image URL is derived from `filename`.
    pub fn new(number: CardNumber, filename: impl AsRef<str>) -> Self {
        let filename = normalize_filename(filename.as_ref());
        let image_url = match basename(&filename) {
            "" => String::new(),
            name => format!("cards/{name}"),
        };
        Self {
            number,
            filename,
            image_url,
            card_type: None,
            raw_text: None,
            fields: DisplayFields::default(),
        }
    }

    /// Replace the localized fields (builder pattern).
    #[must_use]
    pub fn with_fields(mut self, fields: DisplayFields) -> Self {
        self.fields = fields;
        self
    }

    /// Set the text for one language (builder pattern).
    #[must_use]
    pub fn with_text(mut self, language: LanguageTag, text: CardText) -> Self {
        self.fields.insert(language, text);
        self
    }

    #[must_use]
    pub fn with_type(mut self, card_type: impl AsRef<str>) -> Self {
        self.card_type = non_blank(card_type.as_ref());
        self
    }

    #[must_use]
    pub fn with_raw_text(mut self, text: impl AsRef<str>) -> Self {
        self.raw_text = non_blank(text.as_ref());
        self
    }

    /// Resolve title, description and instruction for a locale.
    #[must_use]
    pub fn display_text(&self, locale: Locale) -> DisplayText {
        let language = locale.language();
        let empty = || i18n::format(locale, Message::EmptyField, &[]);

        let title = match self.fields.resolve(&language, TextField::Title) {
            Some(title) => title.to_string(),
            None => i18n::format(
                locale,
                Message::CardPlaceholder,
                &[("number", self.number.padded().as_str())],
            ),
        };
        let description = self
            .fields
            .resolve(&language, TextField::Description)
            .map_or_else(empty, str::to_string);
        let instruction = self
            .fields
            .resolve(&language, TextField::Instruction)
            .map_or_else(empty, str::to_string);

        DisplayText {
            title,
            description,
            instruction,
        }
    }

    /// Caption of a chooser tile; `index` is 0-based.
    #[must_use]
    pub fn caption(&self, locale: Locale, index: usize) -> String {
        match self.fields.resolve(&locale.language(), TextField::Title) {
            Some(title) => title.to_string(),
            None => i18n::format(
                locale,
                Message::VariantPlaceholder,
                &[("index", (index + 1).to_string().as_str())],
            ),
        }
    }

    /// Basename of the image file, empty when there is none.
    #[must_use]
    pub fn image_name(&self) -> &str {
        basename(&self.image_url)
    }

    /// Whether `name` refers to this record's file.
    ///
    /// Only basenames are compared, against both the source filename
    /// and the image URL.
    #[must_use]
    pub fn matches_filename(&self, name: &str) -> bool {
        let wanted = basename(name.trim());
        !wanted.is_empty()
            && (basename(&self.filename) == wanted || self.image_name() == wanted)
    }
}

/// Trim and drop a leading `./`.
fn normalize_filename(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("./")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Last `/`- or `\`-separated component.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or("")
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
