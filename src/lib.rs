//! # card-keypad
//!
//! Look up numbered cards by typing their number on a keypad.
//!
//! ## Design Principles
//!
//! 1. **Sans-IO core**: The input resolver is a plain state machine. It
//!    never sleeps, spawns or fetches; it returns a `Step` telling the
//!    driver what to do next.
//!
//! 2. **Latest input wins**: A pending commit timer or lookup that no
//!    longer matches the entry is dropped, never rendered.
//!
//! 3. **Presentation at the edge**: Everything visible goes through the
//!    `Presenter` trait, so the same resolver drives a terminal, a test
//!    recorder or anything else.
//!
//! ## Architecture
//!
//! - **Catalog**: CSV rows become `CardRecord`s grouped by `CardNumber`.
//!   A number may have several variants.
//!
//! - **Session**: A tokio actor feeds key presses, timer fires and lookup
//!   results to the resolver through one FIFO queue.
//!
//! - **Server**: An axum API over the catalog, plus static file serving
//!   for a browser frontend.
//!
//! ## Modules
//!
//! - `core`: Card numbers, digits, configuration, errors
//! - `i18n`: Locales and user-visible messages
//! - `cards`: Card records, localized text, the catalog and its CSV loader
//! - `keypad`: Entry buffer, commit timer, input resolver
//! - `presenter`: Presenter trait and implementations
//! - `source`: Async card lookup (in-memory or HTTP)
//! - `session`: tokio event loop around the resolver
//! - `server`: HTTP API (`server` feature)

pub mod core;
pub mod i18n;
pub mod cards;
pub mod keypad;
pub mod presenter;
pub mod source;
pub mod session;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use crate::core::{
    CardNumber, Digit, NumberError,
    KeypadConfig, ServerConfig,
    EntryError, ErrorKind, LookupError, CatalogError,
};

pub use crate::i18n::{Locale, Message};

pub use crate::cards::{
    CardCatalog, CardRecord, CardText, CatalogStats, CsvLoader,
    DisplayFields, DisplayText, LanguageTag, TextField, VariantSet,
};

pub use crate::keypad::{
    CommitTimer, EntryBuffer, EntryMode, EntryState,
    InputResolver, KeyEvent, LookupTicket, Step, TimerToken,
};

pub use crate::presenter::{Presenter, PresenterCall, RecordingPresenter, TerminalPresenter};

pub use crate::source::{CardSource, CatalogSource};
#[cfg(feature = "remote")]
pub use crate::source::HttpSource;

pub use crate::session::{KeypadSession, SessionEvent, SessionHandle};
