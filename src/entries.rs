//! Entry list management
//!
//! The ordered collection of (label, source) pairs lives in the settings
//! record as two legacy parallel sequences, `quotes` and `codes`. This
//! manager is the only writer of those sequences: every mutation touches
//! both at the same index under one write lock, then persists the record
//! before returning.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;

use crate::config::{Settings, SettingsStore};

/// A user-visible label paired with executable source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub source: String,
}

/// Error type for entry list operations
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry index {index} is out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// View over the settings record's parallel label/source sequences.
///
/// Cheap to clone; clones share the same underlying record and store.
#[derive(Clone)]
pub struct EntryList {
    settings: Arc<RwLock<Settings>>,
    store: Arc<dyn SettingsStore>,
}

impl EntryList {
    pub fn new(settings: Arc<RwLock<Settings>>, store: Arc<dyn SettingsStore>) -> Self {
        Self { settings, store }
    }

    /// Number of entries (the label sequence is authoritative for length)
    pub fn len(&self) -> usize {
        self.settings
            .read()
            .expect("settings lock poisoned")
            .quotes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the entry at `index`. A label without a persisted source (a
    /// record written by an older version) reads with an empty source.
    pub fn get(&self, index: usize) -> Option<Entry> {
        let settings = self.settings.read().expect("settings lock poisoned");
        let label = settings.quotes.get(index)?.clone();
        let source = settings.codes.get(index).cloned().unwrap_or_default();
        Some(Entry { label, source })
    }

    /// Source text for the entry at `index`, substituting the empty string
    /// when the source sequence lags behind the label sequence.
    pub fn source_at(&self, index: usize) -> Option<String> {
        self.get(index).map(|entry| entry.source)
    }

    /// All entries, in order.
    pub fn entries(&self) -> Vec<Entry> {
        let settings = self.settings.read().expect("settings lock poisoned");
        settings
            .quotes
            .iter()
            .enumerate()
            .map(|(index, label)| Entry {
                label: label.clone(),
                source: settings.codes.get(index).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Append a new entry to both sequences and persist. Returns the new
    /// entry's index.
    pub async fn append(&self, label: &str, source: &str) -> Result<usize, EntryError> {
        let (index, snapshot) = {
            let mut settings = self.settings.write().expect("settings lock poisoned");
            settings.quotes.push(label.to_string());
            settings.codes.push(source.to_string());
            (settings.quotes.len() - 1, settings.clone())
        };

        self.store.save(&snapshot).await?;
        debug!(index, "appended entry");
        Ok(index)
    }

    /// Remove the entry at `index` from both sequences, shifting all
    /// higher-indexed entries down by one, and persist.
    pub async fn remove_at(&self, index: usize) -> Result<(), EntryError> {
        let snapshot = {
            let mut settings = self.settings.write().expect("settings lock poisoned");
            let len = settings.quotes.len();
            if index >= len {
                return Err(EntryError::OutOfRange { index, len });
            }
            settings.quotes.remove(index);
            if index < settings.codes.len() {
                settings.codes.remove(index);
            }
            settings.clone()
        };

        self.store.save(&snapshot).await?;
        debug!(index, "removed entry");
        Ok(())
    }

    /// Overwrite the label at `index` in place and persist.
    pub async fn update_label_at(&self, index: usize, value: &str) -> Result<(), EntryError> {
        let snapshot = {
            let mut settings = self.settings.write().expect("settings lock poisoned");
            let len = settings.quotes.len();
            if index >= len {
                return Err(EntryError::OutOfRange { index, len });
            }
            settings.quotes[index] = value.to_string();
            settings.clone()
        };

        self.store.save(&snapshot).await?;
        Ok(())
    }

    /// Overwrite the source at `index` in place and persist. If the source
    /// sequence lags behind the label sequence, it is grown with empty
    /// strings first so the two stay index-aligned.
    pub async fn update_source_at(&self, index: usize, value: &str) -> Result<(), EntryError> {
        let snapshot = {
            let mut settings = self.settings.write().expect("settings lock poisoned");
            let len = settings.quotes.len();
            if index >= len {
                return Err(EntryError::OutOfRange { index, len });
            }
            if settings.codes.len() <= index {
                settings.codes.resize(index + 1, String::new());
            }
            settings.codes[index] = value.to_string();
            settings.clone()
        };

        self.store.save(&snapshot).await?;
        Ok(())
    }
}
