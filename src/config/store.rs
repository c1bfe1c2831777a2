//! Settings store implementations
//!
//! The store is the host's persistence facility: an opaque record that the
//! plugin loads once at startup and saves after every mutation. Writes are
//! awaited by the triggering operation, so callers never issue a dependent
//! mutation before the previous save has resolved.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use fs2::FileExt;

use super::Settings;

/// Persistence facility for the root settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted record, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<Settings>>;

    /// Persist the record. Resolves once the write is durable.
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// File-backed store keeping the record as a TOML file.
///
/// Saves use an exclusive lock file plus a temp-file write and atomic
/// rename, so concurrent processes cannot interleave writes and a crash
/// mid-save never corrupts the record.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default record location (~/.scrawl/settings.toml)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scrawl")
            .join("settings.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_sync(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", self.path.display()))?;

        Ok(Some(settings))
    }

    fn save_sync(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(settings).with_context(|| "Failed to serialize settings")?;

        // Lock file is separate from the record to avoid issues with rename
        let lock_path = self.path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire settings lock")?;

        // Write to temp file first (atomic write pattern)
        let temp_path = self.path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write settings content")?;

        temp_file
            .sync_all()
            .with_context(|| "Failed to sync settings file")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename settings file: {}", self.path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Option<Settings>> {
        self.load_sync()
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        self.save_sync(settings)
    }
}

/// In-memory store for embedding and tests.
#[derive(Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial record
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(Some(settings)),
        }
    }

    /// Last saved record, if any
    pub fn snapshot(&self) -> Option<Settings> {
        self.inner.lock().expect("store lock poisoned").clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Option<Settings>> {
        Ok(self.snapshot())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.inner.lock().expect("store lock poisoned") = Some(settings.clone());
        Ok(())
    }
}
