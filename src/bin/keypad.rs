//! card-keypad: type a card number, see the card.
//!
//! Usage:
//!   card-keypad --csv data/cards.csv
//!   card-keypad --remote http://localhost:5173 --lang en
//!
//! Keys: digits type, Backspace deletes, Esc clears, Enter resolves now,
//! a-z pick a variant, Tab closes the chooser, q or Ctrl-C quits.

use std::error::Error;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use card_keypad::cards::CardCatalog;
use card_keypad::core::{Digit, EntryError, KeypadConfig};
use card_keypad::i18n::Locale;
use card_keypad::keypad::KeyEvent;
use card_keypad::presenter::{Presenter, TerminalPresenter};
use card_keypad::session::{KeypadSession, SessionHandle};
use card_keypad::source::{CardSource, CatalogSource, HttpSource};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::debug;

#[derive(Parser)]
#[command(name = "card-keypad")]
#[command(about = "Keypad lookup for numbered cards")]
struct Cli {
    /// Catalog CSV to load
    #[arg(long, default_value = "data/cards.csv")]
    csv: PathBuf,

    /// Card server to query instead of a local CSV
    #[arg(long, conflicts_with = "csv")]
    remote: Option<String>,

    /// Display language: pl, en
    #[arg(long, default_value = "pl")]
    lang: Locale,

    /// Wait this long after two digits before resolving
    #[arg(long, default_value_t = 1500)]
    commit_delay_ms: u64,
}

type Screen = TerminalPresenter<Stdout>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = KeypadConfig::default()
        .with_locale(cli.lang)
        .with_commit_delay(Duration::from_millis(cli.commit_delay_ms));
    let mut screen = TerminalPresenter::new(io::stdout(), config.locale);

    match cli.remote {
        Some(url) => run(Arc::new(HttpSource::new(url)), screen, config).await,
        None => match CardCatalog::from_path(&cli.csv) {
            Ok(catalog) => run(Arc::new(CatalogSource::new(catalog)), screen, config).await,
            Err(e) => {
                screen.show_error(&EntryError::CatalogLoadFailure {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        },
    }
}

async fn run<S>(source: Arc<S>, mut screen: Screen, config: KeypadConfig) -> Result<(), Box<dyn Error>>
where
    S: CardSource + 'static,
{
    // Nothing works without data, so refuse to start
    if let Err(e) = source.stats().await {
        screen.show_error(&EntryError::CatalogLoadFailure {
            reason: e.to_string(),
        });
        return Err(e.into());
    }

    let (session, handle) = KeypadSession::new(source, screen, config);

    terminal::enable_raw_mode()?;
    let reader = thread::spawn(move || read_keys(&handle));
    let resolver = session.run().await;
    terminal::disable_raw_mode()?;

    debug!(committed = ?resolver.state().committed(), "keypad closed");
    match reader.join() {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err("key reader thread panicked".into()),
    }
}

/// Forward terminal keys to the session until quit or the session ends.
fn read_keys(handle: &SessionHandle) -> io::Result<()> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let delivered = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                handle.shutdown();
                return Ok(());
            }
            KeyCode::Char('q') => {
                handle.shutdown();
                return Ok(());
            }
            KeyCode::Char(c) => match (Digit::from_char(c), Screen::tile_index(c)) {
                (Some(digit), _) => handle.key(KeyEvent::Digit(digit)),
                (None, Some(index)) => handle.select(index),
                (None, None) => true,
            },
            KeyCode::Backspace => handle.key(KeyEvent::Backspace),
            KeyCode::Esc => handle.key(KeyEvent::Escape),
            KeyCode::Enter => handle.key(KeyEvent::Enter),
            KeyCode::Tab => handle.close_chooser(),
            _ => true,
        };
        if !delivered {
            return Ok(());
        }
    }
}
