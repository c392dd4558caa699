//! Configuration types.
//!
//! - `KeypadConfig`: behavior of the keypad resolver (commit delay, locale).
//! - `ServerConfig`: where the HTTP server finds its files and listens.
//!
//! `ServerConfig` is read from the environment (with an optional `.env`
//! file). Relative paths are resolved against a base directory, except
//! `CARDS_DIR`, which is relative to `PUBLIC_DIR`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// Keypad resolver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadConfig {
    /// Delay before a two-digit entry is resolved on its own.
    pub commit_delay: Duration,

    /// Interface locale; also selects the preferred card text language.
    pub locale: Locale,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            commit_delay: Duration::from_millis(1500),
            locale: Locale::Pl,
        }
    }
}

impl KeypadConfig {
    /// Set the two-digit auto-commit delay.
    #[must_use]
    pub fn with_commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay = delay;
        self
    }

    /// Set the interface locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Static frontend files (index.html, styles, scripts).
    pub public_dir: PathBuf,

    /// Card images, served under `/cards`.
    pub cards_dir: PathBuf,

    /// CSV file the catalog is built from.
    pub cards_csv: PathBuf,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 5173;

    /// Read configuration from the process environment.
    ///
    /// Loads `.env` from the working directory first, if present.
    /// Relative paths resolve against the working directory.
    pub fn from_env() -> std::io::Result<Self> {
        dotenvy::dotenv().ok();
        let base = std::env::current_dir()?;
        Ok(Self::from_lookup(&base, |key| std::env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Recognized variables: `PORT`, `BIND_ADDR`, `PUBLIC_DIR`,
    /// `CARDS_DIR`, `CARDS_CSV`. Empty values count as unset; an
    /// unparsable `PORT` or `BIND_ADDR` falls back to its default.
    pub fn from_lookup<F>(base: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(Self::DEFAULT_PORT);
        let ip = var("BIND_ADDR")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let public_dir = resolve_maybe_relative(base, var("PUBLIC_DIR").as_deref().unwrap_or("docs"));
        let cards_dir =
            resolve_maybe_relative(&public_dir, var("CARDS_DIR").as_deref().unwrap_or("cards"));
        let cards_csv = resolve_maybe_relative(
            base,
            var("CARDS_CSV").as_deref().unwrap_or("data/cards.csv"),
        );

        Self {
            bind: SocketAddr::new(ip, port),
            public_dir,
            cards_dir,
            cards_csv,
        }
    }
}

/// Absolute paths are kept; relative ones are joined onto `base`.
fn resolve_maybe_relative(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
