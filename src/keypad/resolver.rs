//! The input resolver: keypad events in, lookups and renders out.
//!
//! `InputResolver` owns the `EntryState` and the `Presenter`. Every
//! operation updates the state synchronously, tells the presenter what
//! changed, and returns a `Step` for the things it cannot do itself:
//!
//! - `Step::ArmTimer(token)`: call `on_timer(token)` after the commit delay
//! - `Step::Lookup(ticket)`: fetch the variants of `ticket.number()` and
//!   hand them to `complete_lookup(ticket, ..)`
//!
//! ## Staleness
//!
//! Every buffer-mutating event bumps a generation counter. A lookup
//! ticket carries the generation it was issued in; results for an older
//! generation are dropped without rendering. Timer fires are checked
//! against the `CommitTimer` token and the buffer length at fire time.

use tracing::debug;

use crate::cards::{CardRecord, VariantSet};
use crate::core::{CardNumber, Digit, EntryError, KeypadConfig, LookupError};
use crate::presenter::Presenter;

use super::entry::EntryState;
use super::timer::TimerToken;
use super::KeyEvent;

/// A lookup the driver must perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    number: CardNumber,
    generation: u64,
}

impl LookupTicket {
    /// Number to look up.
    #[must_use]
    pub fn number(self) -> CardNumber {
        self.number
    }

    /// Generation the lookup was issued in.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Follow-up work requested by a resolver operation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do.
    Idle,
    /// Schedule `on_timer(token)` after `KeypadConfig::commit_delay`.
    ArmTimer(TimerToken),
    /// Fetch variants and call `complete_lookup`.
    Lookup(LookupTicket),
}

/// Keypad state machine.
///
/// ## Example
///
/// ```
/// use card_keypad::cards::{CardCatalog, CardRecord};
/// use card_keypad::core::{CardNumber, Digit, KeypadConfig};
/// use card_keypad::keypad::{InputResolver, Step};
/// use card_keypad::presenter::RecordingPresenter;
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardRecord::new(CardNumber::new(5).unwrap(), "005.png"));
///
/// let mut resolver = InputResolver::new(RecordingPresenter::new(), KeypadConfig::default());
/// for c in ['0', '0'] {
///     let _ = resolver.push_digit(Digit::from_char(c).unwrap());
/// }
/// let step = resolver.push_digit(Digit::from_char('5').unwrap());
///
/// let Step::Lookup(ticket) = step else { panic!("expected a lookup") };
/// resolver.complete_lookup(ticket, Ok(catalog.variants(ticket.number()).clone()));
///
/// assert_eq!(resolver.state().committed_text().as_deref(), Some("005"));
/// ```
#[derive(Debug)]
pub struct InputResolver<P: Presenter> {
    state: EntryState,
    presenter: P,
    config: KeypadConfig,
    generation: u64,
}

impl<P: Presenter> InputResolver<P> {
    /// Create a resolver in the `Empty` state.
    pub fn new(presenter: P, config: KeypadConfig) -> Self {
        Self {
            state: EntryState::new(),
            presenter,
            config,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &EntryState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Current generation; bumped by every buffer-mutating event.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Give back the presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Redraw the display from the current state.
    pub fn refresh(&mut self) {
        self.render_buffer();
    }

    /// Dispatch a physical key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Step {
        match key {
            KeyEvent::Digit(digit) => self.push_digit(digit),
            KeyEvent::Backspace => {
                self.backspace();
                Step::Idle
            }
            KeyEvent::Escape => {
                self.clear_all();
                Step::Idle
            }
            KeyEvent::Enter => self.enter(),
        }
    }

    /// Append a digit.
    ///
    /// A digit typed after a commit starts a new entry; a fourth digit
    /// starts over. Three digits resolve at once, two arm the timer.
    pub fn push_digit(&mut self, digit: Digit) -> Step {
        if self.state.buffer.is_empty() {
            self.state.committed = None;
        }
        if self.state.buffer.is_full() {
            self.state.buffer.clear();
        }
        self.state.buffer.push(digit);
        self.bump();
        self.state.timer.cancel();
        self.render_buffer();

        match self.state.buffer.len() {
            3 => {
                let value = self.state.buffer.value();
                if CardNumber::new(value).is_some() {
                    self.resolve(value)
                } else {
                    let entry = self.state.buffer.as_string();
                    self.raise(EntryError::OutOfRange { entry });
                    Step::Idle
                }
            }
            2 => {
                let token = self.state.timer.arm();
                debug!(%token, entry = %self.state.buffer.as_string(), "commit timer armed");
                Step::ArmTimer(token)
            }
            _ => Step::Idle,
        }
    }

    /// Remove the last digit, or forget the committed number when the
    /// buffer is empty. No-op when both are empty.
    pub fn backspace(&mut self) {
        self.state.timer.cancel();
        if self.state.buffer.pop().is_none() && self.state.committed.take().is_none() {
            return;
        }
        self.bump();
        self.render_buffer();
    }

    /// Full reset: buffer, committed number, timer, error, chooser and
    /// result view. Idempotent.
    pub fn clear_all(&mut self) {
        self.bump();
        self.state.timer.cancel();
        self.state.buffer.clear();
        self.state.committed = None;
        self.state.error = None;
        self.state.shown = None;
        self.close_chooser();

        self.render_buffer();
        self.presenter.clear_error();
        self.presenter.hide_result();
    }

    /// Resolve the buffer now, whatever its length (the Enter key).
    pub fn enter(&mut self) -> Step {
        if self.state.buffer.is_empty() {
            return Step::Idle;
        }
        self.state.timer.cancel();
        let value = self.state.buffer.value();
        self.resolve(value)
    }

    /// Commit timer callback.
    ///
    /// Resolves only if `token` is still armed and the buffer still
    /// holds exactly two digits.
    pub fn on_timer(&mut self, token: TimerToken) -> Step {
        if !self.state.timer.fire(token) {
            debug!(%token, "ignoring stale commit timer");
            return Step::Idle;
        }
        if self.state.buffer.len() != 2 {
            debug!(%token, "buffer changed before commit timer fired");
            return Step::Idle;
        }
        let value = self.state.buffer.value();
        self.resolve(value)
    }

    /// Start resolving `number`.
    ///
    /// Out-of-range numbers raise `InvalidRange` and leave the committed
    /// number alone. Valid numbers produce a lookup ticket.
    pub fn resolve(&mut self, number: u32) -> Step {
        match CardNumber::new(number) {
            Some(number) => {
                debug!(%number, generation = self.generation, "lookup issued");
                Step::Lookup(LookupTicket {
                    number,
                    generation: self.generation,
                })
            }
            None => {
                self.raise(EntryError::InvalidRange { number });
                Step::Idle
            }
        }
    }

    /// Apply the result of a lookup.
    ///
    /// Returns `false` when the ticket is stale and the result was
    /// discarded.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<VariantSet, LookupError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                number = %ticket.number,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale lookup"
            );
            return false;
        }

        let number = ticket.number;
        match result {
            Err(e) => self.raise(EntryError::LookupFailed {
                number,
                reason: e.to_string(),
            }),
            Ok(variants) if variants.is_empty() => self.raise(EntryError::NotFound { number }),
            Ok(variants) if variants.len() == 1 => {
                self.close_chooser();
                if let Some(record) = variants.into_vec().pop() {
                    self.show(record);
                }
                self.commit(number);
            }
            Ok(variants) => {
                debug!(%number, count = variants.len(), "opening variant chooser");
                self.state.error = None;
                self.presenter.clear_error();
                let variants = self.state.open_choice.insert(variants);
                self.presenter.show_chooser(variants);
            }
        }
        true
    }

    /// Pick a variant: close the chooser, show it, commit its number.
    pub fn select_variant(&mut self, record: CardRecord) {
        self.bump();
        self.close_chooser();
        let number = record.number;
        self.show(record);
        self.commit(number);
    }

    /// Pick tile `index` of the open chooser.
    ///
    /// Returns `false` if no chooser is open or the index is out of bounds.
    pub fn select_choice(&mut self, index: usize) -> bool {
        let record = self
            .state
            .open_choice
            .as_ref()
            .and_then(|variants| variants.get(index))
            .cloned();
        match record {
            Some(record) => {
                self.select_variant(record);
                true
            }
            None => false,
        }
    }

    /// Dismiss the chooser without picking. Buffer and committed number
    /// stay as they were.
    pub fn close_chooser(&mut self) {
        if self.state.open_choice.take().is_some() {
            self.presenter.close_chooser();
        }
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    fn render_buffer(&mut self) {
        let text = self.state.display_text();
        self.presenter.show_buffer(&text);
    }

    fn raise(&mut self, error: EntryError) {
        debug!(%error, "entry error");
        self.state.shown = None;
        self.presenter.show_error(&error);
        self.state.error = Some(error);
    }

    fn show(&mut self, record: CardRecord) {
        self.state.error = None;
        self.presenter.clear_error();
        self.presenter.show_record(&record);
        self.state.shown = Some(record);
    }

    fn commit(&mut self, number: CardNumber) {
        debug!(%number, "committed");
        self.state.committed = Some(number);
        self.state.buffer.clear();
        self.state.timer.cancel();
        self.render_buffer();
    }
}
