//! Favorite tickers, persisted outside the screening core.
//!
//! The store is a plain set of strings behind [`FavoritesStore`]; the JSON
//! file store keeps it as a sorted array so the file diffs cleanly.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("favorites I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("favorites file {path} is not a JSON array of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("ticker is empty")]
    EmptyTicker,
}

/// Load/save a set of ticker strings.
pub trait FavoritesStore {
    fn load(&self) -> Result<BTreeSet<String>, FavoritesError>;
    fn save(&self, favorites: &BTreeSet<String>) -> Result<(), FavoritesError>;
}

/// Favorites kept in a JSON file. A missing file is an empty set.
#[derive(Debug, Clone)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> FavoritesError {
        FavoritesError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn load(&self) -> Result<BTreeSet<String>, FavoritesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeSet::new());
        }
        serde_json::from_str(&content).map_err(|source| FavoritesError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Creates parent directories if needed.
    fn save(&self, favorites: &BTreeSet<String>) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(favorites).map_err(|source| {
            FavoritesError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    favorites: Mutex<BTreeSet<String>>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites<I, S>(favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            favorites: Mutex::new(favorites.into_iter().map(Into::into).collect()),
        }
    }
}

impl FavoritesStore for MemoryFavoritesStore {
    fn load(&self) -> Result<BTreeSet<String>, FavoritesError> {
        Ok(self
            .favorites
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, favorites: &BTreeSet<String>) -> Result<(), FavoritesError> {
        *self
            .favorites
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = favorites.clone();
        Ok(())
    }
}

fn normalize(ticker: &str) -> Result<String, FavoritesError> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        Err(FavoritesError::EmptyTicker)
    } else {
        Ok(ticker)
    }
}

/// Add a ticker (trimmed, upper-cased). Returns false if it was already there.
pub fn add_favorite(store: &dyn FavoritesStore, ticker: &str) -> Result<bool, FavoritesError> {
    let ticker = normalize(ticker)?;
    let mut favorites = store.load()?;
    if !favorites.insert(ticker) {
        return Ok(false);
    }
    store.save(&favorites)?;
    Ok(true)
}

/// Remove a ticker. Returns false if it was not a favorite.
pub fn remove_favorite(store: &dyn FavoritesStore, ticker: &str) -> Result<bool, FavoritesError> {
    let ticker = normalize(ticker)?;
    let mut favorites = store.load()?;
    if !favorites.remove(&ticker) {
        return Ok(false);
    }
    store.save(&favorites)?;
    Ok(true)
}
