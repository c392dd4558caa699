//! Presentation adapters.
//!
//! The keypad resolver never draws anything itself; it tells a
//! `Presenter` what changed. A presenter owns the visible surface: the
//! three-character display, the result view, the variant chooser and
//! the error line.
//!
//! - `RecordingPresenter`: keeps every call, for tests and headless use
//! - `TerminalPresenter`: writes a text rendering to any `io::Write`

mod recording;
mod terminal;

pub use recording::{PresenterCall, RecordingPresenter};
pub use terminal::TerminalPresenter;

use crate::cards::{CardRecord, VariantSet};
use crate::core::EntryError;

/// Receiver of all visible changes.
pub trait Presenter {
    /// Show the keypad display: `"3__"`, a committed `"005"`, or `"___"`.
    fn show_buffer(&mut self, text: &str);

    /// Show a card in the result view (title, description, instruction,
    /// image), using the presenter's language with fallback.
    fn show_record(&mut self, record: &CardRecord);

    /// Offer variants to choose from. A selection must be reported back
    /// to the resolver (`select_variant`/`select_choice`).
    fn show_chooser(&mut self, variants: &VariantSet);

    /// Remove the chooser.
    fn close_chooser(&mut self);

    /// Show a localized error and hide the result view.
    fn show_error(&mut self, error: &EntryError);

    fn clear_error(&mut self);

    fn hide_result(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn show_buffer(&mut self, text: &str) {
        (**self).show_buffer(text);
    }

    fn show_record(&mut self, record: &CardRecord) {
        (**self).show_record(record);
    }

    fn show_chooser(&mut self, variants: &VariantSet) {
        (**self).show_chooser(variants);
    }

    fn close_chooser(&mut self) {
        (**self).close_chooser();
    }

    fn show_error(&mut self, error: &EntryError) {
        (**self).show_error(error);
    }

    fn clear_error(&mut self) {
        (**self).clear_error();
    }

    fn hide_result(&mut self) {
        (**self).hide_result();
    }
}
