//! JSON file storage for the saved deck.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use flashcard_core::backup::{decode_stored, default_cards, encode_stored, stored_info};
use flashcard_core::{Card, CardStore, StorageInfo, StoreError};
use tempfile::NamedTempFile;

/// Card store backed by a single JSON document on disk.
///
/// A missing or unreadable file behaves like an empty browser storage slot:
/// `load` returns the sample cards and `info` reports no data.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl CardStore for JsonFileStore {
    fn load(&self) -> Vec<Card> {
        let Some(content) = self.read() else {
            tracing::info!("No saved flashcards found, using default cards");
            return default_cards();
        };

        match decode_stored(&content) {
            Ok(cards) => {
                tracing::debug!("Loaded {} flashcards from {}", cards.len(), self.path.display());
                cards
            }
            Err(e) => {
                tracing::warn!("Unusable flashcard data ({}), using default cards", e);
                default_cards()
            }
        }
    }

    fn save(&self, cards: &[Card]) -> Result<(), StoreError> {
        let content = encode_stored(cards, Utc::now())?;

        let dir = self.dir();
        fs::create_dir_all(dir)?;

        // Each save writes its own temp file in the target directory.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!("Saved {} flashcards to {}", cards.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Cleared saved flashcards");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn info(&self) -> StorageInfo {
        self.read()
            .map(|content| stored_info(&content))
            .unwrap_or_default()
    }
}
