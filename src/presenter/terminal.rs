//! Plain-text presenter for terminals.
//!
//! Lines end in `\r\n` so output stays aligned when the terminal is in
//! raw mode.

use std::io::Write;

use tracing::warn;

use crate::cards::{CardRecord, VariantSet};
use crate::core::EntryError;
use crate::i18n::{self, Locale, Message};

use super::Presenter;

const EOL: &str = "\r\n";

/// Writes the keypad surface as text lines.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    locale: Locale,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, locale: Locale) -> Self {
        Self { out, locale }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Key label for chooser tile `index` (`a`, `b`, ...).
    #[must_use]
    pub fn tile_key(index: usize) -> Option<char> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < 26)
            .map(|i| char::from(b'a' + i))
    }

    /// Inverse of `tile_key`.
    #[must_use]
    pub fn tile_index(key: char) -> Option<usize> {
        key.is_ascii_lowercase()
            .then(|| usize::from(key as u8 - b'a'))
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| write!(self.out, "{line}{EOL}"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_buffer(&mut self, text: &str) {
        self.write_lines(&[format!("[ {text} ]")]);
    }

    fn show_record(&mut self, record: &CardRecord) {
        let text = record.display_text(self.locale);
        let mut lines = vec![
            format!("== {} | {} ==", record.number, text.title),
            format!("  {}", text.description),
            format!("  {}", text.instruction),
        ];
        if !record.image_url.is_empty() {
            lines.push(format!("  ({})", record.image_url));
        }
        self.write_lines(&lines);
    }

    fn show_chooser(&mut self, variants: &VariantSet) {
        let mut lines = vec![format!(
            "{}:",
            i18n::format(self.locale, Message::ChooserTitle, &[])
        )];
        for (index, record) in variants.iter().enumerate() {
            let key = Self::tile_key(index).unwrap_or('?');
            let mut line = format!("  {key}) {}", record.caption(self.locale, index));
            if let Some(card_type) = &record.card_type {
                line.push_str(&format!(" [{card_type}]"));
            }
            lines.push(line);
        }
        self.write_lines(&lines);
    }

    fn close_chooser(&mut self) {}

    fn show_error(&mut self, error: &EntryError) {
        let line = format!("! {}", i18n::error_text(self.locale, error));
        self.write_lines(&[line]);
    }

    fn clear_error(&mut self) {}

    fn hide_result(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardText, LanguageTag, TextField};
    use crate::core::CardNumber;

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_buffer_line() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Locale::Pl);
        presenter.show_buffer("07_");
        assert_eq!(output(presenter), "[ 07_ ]\r\n");
    }

    #[test]
    fn test_record_lines() {
        let number = CardNumber::new(5).unwrap();
        let record = CardRecord::new(number, "005.png").with_text(
            LanguageTag::new("pl"),
            CardText::new().with(TextField::Title, "Port"),
        );

        let mut presenter = TerminalPresenter::new(Vec::new(), Locale::Pl);
        presenter.show_record(&record);
        let text = output(presenter);

        assert!(text.starts_with("== 005 | Port ==\r\n"));
        assert!(text.contains("(cards/005.png)"));
    }

    #[test]
    fn test_chooser_lines() {
        let number = CardNumber::new(12).unwrap();
        let variants: VariantSet = vec![
            CardRecord::new(number, "012a.png"),
            CardRecord::new(number, "012b.png").with_type("night"),
        ]
        .into();

        let mut presenter = TerminalPresenter::new(Vec::new(), Locale::Pl);
        presenter.show_chooser(&variants);
        let text = output(presenter);

        assert!(text.starts_with("Wybierz wariant:\r\n"));
        assert!(text.contains("  a) Wariant 1\r\n"));
        assert!(text.contains("  b) Wariant 2 [night]\r\n"));
    }

    #[test]
    fn test_error_line() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Locale::En);
        presenter.show_error(&EntryError::OutOfRange {
            entry: "500".into(),
        });
        assert_eq!(output(presenter), "! Number out of range (000-499).\r\n");
    }

    #[test]
    fn test_tile_key() {
        assert_eq!(TerminalPresenter::<Vec<u8>>::tile_key(0), Some('a'));
        assert_eq!(TerminalPresenter::<Vec<u8>>::tile_key(25), Some('z'));
        assert_eq!(TerminalPresenter::<Vec<u8>>::tile_key(26), None);
        assert_eq!(TerminalPresenter::<Vec<u8>>::tile_index('b'), Some(1));
        assert_eq!(TerminalPresenter::<Vec<u8>>::tile_index('B'), None);
    }
}
