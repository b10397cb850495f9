//! Application state container and its persistence backends.
//!
//! `StateStore` is the single owner of the persisted application state. Every
//! component reads it with [`StateStore::get`] and changes it with
//! [`StateStore::set`] / [`StateStore::update`]; nothing else writes it.
//! Observers registered with [`StateStore::subscribe`] see each new value.
//!
//! Backends:
//! - `InMemory` (default): a shared map of JSON documents, used for tests and
//!   sessions that should not persist anything.
//! - `Redb`: one JSON document per key in a `redb` table.
//!
//! `set` is synchronous for the caller: the next `get` observes the new value
//! even if the backend write failed. Backend failures are logged, never
//! raised. Unreadable or malformed persisted data is logged and replaced by
//! the initial state.

use crate::phrases::PhraseSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Key under which the application state document is stored.
pub const STATE_KEY: &str = "app-state";

/// Seconds per scan step in a fresh state.
pub const DEFAULT_SPEED: f64 = 2.0;

/// Errors raised by the persistence backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state database error: {0}")]
    Database(#[from] redb::Error),
    #[error("malformed state document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("state store lock poisoned")]
    Poisoned,
}

/// Which board is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Phrases,
    Letters,
    /// Free typing without scanning
    Typing,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Phrases
    }
}

impl Mode {
    /// Mode order used when cycling through boards.
    pub const ALL: [Mode; 3] = [Mode::Phrases, Mode::Letters, Mode::Typing];

    pub fn next(self) -> Self {
        match self {
            Mode::Phrases => Mode::Letters,
            Mode::Letters => Mode::Typing,
            Mode::Typing => Mode::Phrases,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Phrases => "Phrases",
            Mode::Letters => "Letters",
            Mode::Typing => "Typing",
        }
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub mode: Mode,
    pub phrases: PhraseSet,
    pub typed_sentence: String,
    pub letter_sentence: String,
    pub phrase_sentence: String,
    /// Seconds per scan step; zero or less means paused
    pub speed: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Phrases,
            phrases: PhraseSet::seeded(),
            typed_sentence: String::new(),
            letter_sentence: String::new(),
            phrase_sentence: String::new(),
            speed: DEFAULT_SPEED,
        }
    }
}

impl AppState {
    /// Whether the scan clocks should run at this speed.
    pub fn is_playing(&self) -> bool {
        self.speed > 0.0
    }

    /// Scan period in milliseconds. Non-positive speeds fall back to the default.
    pub fn interval_ms(&self) -> u64 {
        let seconds = if self.speed > 0.0 {
            self.speed
        } else {
            DEFAULT_SPEED
        };
        (seconds * 1000.0).round() as u64
    }
}

// ============================================================================
// Backends
// ============================================================================

/// In-memory document map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Redb-backed document table.
pub struct RedbBackend {
    db: redb::Database,
    path: PathBuf,
}

impl RedbBackend {
    const TABLE_DEF: redb::TableDefinition<'static, &'static str, &'static str> =
        redb::TableDefinition::new("app_state");

    /// Create or open a database at `path`, creating parent directories.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref()).map_err(redb::Error::from)?;
        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_raw(key)?)
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.write_raw(key, value)?)
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(Self::TABLE_DEF) {
            Ok(table) => table,
            // nothing written yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl fmt::Debug for RedbBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbBackend")
            .field("path", &self.path)
            .finish()
    }
}

/// Backend switch.
#[derive(Debug)]
pub enum Backend {
    InMemory(InMemoryBackend),
    Redb(RedbBackend),
}

impl Backend {
    pub fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Backend::InMemory(m) => m.read(key),
            Backend::Redb(r) => r.read(key),
        }
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Backend::InMemory(m) => m.write(key, value),
            Backend::Redb(r) => r.write(key, value),
        }
    }
}

// ============================================================================
// StateStore
// ============================================================================

/// Handle returned by [`StateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&AppState)>;

/// The application state container.
pub struct StateStore {
    backend: Backend,
    current: AppState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl StateStore {
    /// Store with a fresh in-memory backend and the initial state.
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::InMemory(InMemoryBackend::new()))
    }

    /// Open (or create) a redb-backed store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self::with_backend(Backend::Redb(RedbBackend::new(path)?)))
    }

    /// Wrap a backend, loading whatever state it holds.
    pub fn with_backend(backend: Backend) -> Self {
        let current = load_state(&backend);
        Self {
            backend,
            current,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Current state.
    pub fn get(&self) -> &AppState {
        &self.current
    }

    /// Replace the state, notify observers and write it through to the backend.
    pub fn set(&mut self, state: AppState) {
        if state == self.current {
            return;
        }
        self.current = state;
        for (_, observer) in &self.observers {
            observer(&self.current);
        }
        self.persist();
    }

    /// Apply `f` to a copy of the state and store the result.
    pub fn update<F: FnOnce(&mut AppState)>(&mut self, f: F) {
        let mut next = self.current.clone();
        f(&mut next);
        self.set(next);
    }

    /// Register an observer called after every change.
    pub fn subscribe<F: Fn(&AppState) + 'static>(&mut self, observer: F) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        self.observers.len() != before
    }

    /// Re-read the state from the backend, discarding the in-memory copy.
    pub fn reload(&mut self) {
        let state = load_state(&self.backend);
        self.set(state);
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.current)
            .map_err(StoreError::from)
            .and_then(|doc| self.backend.write(STATE_KEY, &doc));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist app state");
        }
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("backend", &self.backend)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn load_state(backend: &Backend) -> AppState {
    match backend.read(STATE_KEY) {
        Ok(Some(doc)) => match serde_json::from_str::<AppState>(&doc) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "persisted app state is malformed, using initial state");
                AppState::default()
            }
        },
        Ok(None) => AppState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read app state, using initial state");
            AppState::default()
        }
    }
}
