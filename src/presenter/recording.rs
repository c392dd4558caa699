//! Presenter that records calls instead of drawing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cards::{CardRecord, VariantSet};
use crate::core::EntryError;

use super::Presenter;

/// One presenter call, with its argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterCall {
    Buffer(String),
    Record(CardRecord),
    Chooser(VariantSet),
    CloseChooser,
    Error(EntryError),
    ClearError,
    HideResult,
}

/// Records every call in order.
///
/// Clones share the same log, so a clone can be handed to a resolver or
/// session while this one is kept for inspection.
///
/// ```
/// use card_keypad::presenter::{Presenter, PresenterCall, RecordingPresenter};
///
/// let log = RecordingPresenter::new();
/// let mut presenter = log.clone();
/// presenter.show_buffer("1__");
///
/// assert_eq!(log.calls(), vec![PresenterCall::Buffer("1__".into())]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    calls: Arc<Mutex<Vec<PresenterCall>>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.lock().clone()
    }

    /// Remove and return all calls so far.
    pub fn take(&self) -> Vec<PresenterCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Text of the latest `show_buffer`.
    #[must_use]
    pub fn last_buffer(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|call| match call {
            PresenterCall::Buffer(text) => Some(text.clone()),
            _ => None,
        })
    }

    /// Records passed to `show_record`, in order.
    #[must_use]
    pub fn records(&self) -> Vec<CardRecord> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Record(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    /// Errors passed to `show_error`, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<EntryError> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Error(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }

    /// Variant sets passed to `show_chooser`, in order.
    #[must_use]
    pub fn choosers(&self) -> Vec<VariantSet> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Chooser(variants) => Some(variants.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: PresenterCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PresenterCall>> {
        // A panicking test thread must not hide the log from the others
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Presenter for RecordingPresenter {
    fn show_buffer(&mut self, text: &str) {
        self.push(PresenterCall::Buffer(text.to_string()));
    }

    fn show_record(&mut self, record: &CardRecord) {
        self.push(PresenterCall::Record(record.clone()));
    }

    fn show_chooser(&mut self, variants: &VariantSet) {
        self.push(PresenterCall::Chooser(variants.clone()));
    }

    fn close_chooser(&mut self) {
        self.push(PresenterCall::CloseChooser);
    }

    fn show_error(&mut self, error: &EntryError) {
        self.push(PresenterCall::Error(error.clone()));
    }

    fn clear_error(&mut self) {
        self.push(PresenterCall::ClearError);
    }

    fn hide_result(&mut self) {
        self.push(PresenterCall::HideResult);
    }
}
