//! Keypad event loop.
//!
//! `KeypadSession` owns an `InputResolver` and runs it as a single actor
//! on tokio. Everything that can change the entry state arrives through
//! one FIFO queue: key presses and chooser picks from `SessionHandle`,
//! timer fires from the commit timer task, and lookup results from the
//! card source. Events are handled one at a time, in arrival order, so
//! input sent before the timer fires is always handled before it.
//!
//! Lookups run as separate tasks; the session keeps accepting input while
//! they are in flight and the resolver drops results that arrive for an
//! entry the user has moved on from.
//!
//! ```no_run
//! use std::sync::Arc;
//! use card_keypad::cards::CardCatalog;
//! use card_keypad::core::KeypadConfig;
//! use card_keypad::presenter::RecordingPresenter;
//! use card_keypad::session::KeypadSession;
//! use card_keypad::source::CatalogSource;
//!
//! # async fn demo() {
//! let source = Arc::new(CatalogSource::new(CardCatalog::new()));
//! let (session, handle) =
//!     KeypadSession::new(source, RecordingPresenter::new(), KeypadConfig::default());
//! let task = tokio::spawn(session.run());
//!
//! handle.press_digits("012");
//! handle.shutdown();
//! let resolver = task.await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cards::{CardRecord, VariantSet};
use crate::core::{Digit, KeypadConfig, LookupError};
use crate::keypad::{InputResolver, KeyEvent, LookupTicket, Step, TimerToken};
use crate::presenter::Presenter;
use crate::source::CardSource;

/// Everything the session reacts to.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// A key press.
    Key(KeyEvent),
    /// Chooser tile picked by index.
    Select(usize),
    /// Chooser tile picked by record.
    SelectRecord(CardRecord),
    /// Chooser dismissed.
    CloseChooser,
    /// The commit timer elapsed.
    TimerFired(TimerToken),
    /// A lookup finished.
    LookupDone {
        ticket: LookupTicket,
        result: Result<VariantSet, LookupError>,
    },
    /// Stop the loop.
    Shutdown,
}

/// Sending side of a session. Cheap to clone.
///
/// Every method returns `false` once the session has stopped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn key(&self, key: KeyEvent) -> bool {
        self.send(SessionEvent::Key(key))
    }

    /// Press each digit of `text` in order; other characters are skipped.
    pub fn press_digits(&self, text: &str) -> bool {
        text.chars()
            .filter_map(Digit::from_char)
            .all(|d| self.key(KeyEvent::Digit(d)))
    }

    pub fn select(&self, index: usize) -> bool {
        self.send(SessionEvent::Select(index))
    }

    pub fn select_record(&self, record: CardRecord) -> bool {
        self.send(SessionEvent::SelectRecord(record))
    }

    pub fn close_chooser(&self) -> bool {
        self.send(SessionEvent::CloseChooser)
    }

    pub fn shutdown(&self) -> bool {
        self.send(SessionEvent::Shutdown)
    }
}

/// The keypad actor.
pub struct KeypadSession<S, P: Presenter> {
    resolver: InputResolver<P>,
    source: Arc<S>,
    // Weak so the loop ends once every handle is gone
    tx: WeakUnboundedSender<SessionEvent>,
    rx: UnboundedReceiver<SessionEvent>,
    timer_task: Option<JoinHandle<()>>,
}

impl<S, P> KeypadSession<S, P>
where
    S: CardSource + 'static,
    P: Presenter,
{
    /// Create a session and the handle that feeds it.
    pub fn new(source: Arc<S>, presenter: P, config: KeypadConfig) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            resolver: InputResolver::new(presenter, config),
            source,
            tx: tx.downgrade(),
            rx,
            timer_task: None,
        };
        (session, SessionHandle { tx })
    }

    #[must_use]
    pub fn resolver(&self) -> &InputResolver<P> {
        &self.resolver
    }

    /// Run until `Shutdown` or until every handle is dropped.
    ///
    /// Returns the resolver so its final state can be inspected.
    pub async fn run(mut self) -> InputResolver<P> {
        self.resolver.refresh();

        while let Some(event) = self.rx.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                debug!("keypad session shutting down");
                break;
            }
            self.dispatch(event);
        }

        self.cancel_timer_task();
        self.resolver
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let step = match event {
            SessionEvent::Key(key) => self.resolver.handle_key(key),
            SessionEvent::Select(index) => {
                if !self.resolver.select_choice(index) {
                    debug!(index, "no chooser tile at index");
                }
                Step::Idle
            }
            SessionEvent::SelectRecord(record) => {
                self.resolver.select_variant(record);
                Step::Idle
            }
            SessionEvent::CloseChooser => {
                self.resolver.close_chooser();
                Step::Idle
            }
            SessionEvent::TimerFired(token) => self.resolver.on_timer(token),
            SessionEvent::LookupDone { ticket, result } => {
                self.resolver.complete_lookup(ticket, result);
                Step::Idle
            }
            SessionEvent::Shutdown => Step::Idle,
        };

        self.apply(step);

        if !self.resolver.state().timer().is_armed() {
            self.cancel_timer_task();
        }
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Idle => {}
            Step::ArmTimer(token) => {
                self.cancel_timer_task();
                let delay = self.resolver.config().commit_delay;
                let tx = self.tx.clone();
                self.timer_task = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(SessionEvent::TimerFired(token));
                    }
                }));
            }
            Step::Lookup(ticket) => {
                let source = Arc::clone(&self.source);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = source.variants(ticket.number()).await;
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(SessionEvent::LookupDone { ticket, result });
                    }
                });
            }
        }
    }

    fn cancel_timer_task(&mut self) {
        if let Some(task) = self.timer_task.take() {
            task.abort();
        }
    }
}
