//! Persisted editor record and the storage seam.
//!
//! The record is `{ "elements": [...], "elementCounter": N }`, the same JSON
//! the browser keeps under [`STORAGE_KEY`]. Where it is kept is behind the
//! [`StateStore`] trait: [`MemoryStore`] for tests, [`LocalStore`] for the
//! browser, and a file-backed store in the command-line host.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;
use crate::doc::Element;

/// Error returned by persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The stored payload is not a valid editor record.
    #[error("corrupt editor state: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// The storage backend rejected the operation.
    #[error("storage unavailable: {0}")]
    Storage(String),
    /// File-backed storage failed.
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
}

/// The persisted editor record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub elements: Vec<Element>,
    /// Number of elements ever created; never decreases except on reset.
    pub element_counter: u64,
}

impl PersistedState {
    /// Serialize to the compact storage form.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Corrupt`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored payload. Missing fields default to empty.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Corrupt`] if `raw` is not a valid record.
    pub fn from_json(raw: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A key-value slot holding one serialized [`PersistedState`].
pub trait StateStore {
    /// Read the stored payload. `Ok(None)` means nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Overwrite the stored payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&mut self, raw: &str) -> Result<(), PersistError>;

    /// Remove the stored payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Load and parse the record from `store`.
///
/// # Errors
///
/// Returns the backend error, or [`PersistError::Corrupt`] for an unparsable payload.
pub fn load_state(store: &dyn StateStore) -> Result<Option<PersistedState>, PersistError> {
    match store.load()? {
        Some(raw) => PersistedState::from_json(&raw).map(Some),
        None => Ok(None),
    }
}

/// Serialize and write the record to `store`.
///
/// # Errors
///
/// Returns the serialization or backend error.
pub fn save_state(store: &mut dyn StateStore, state: &PersistedState) -> Result<(), PersistError> {
    let raw = state.to_json()?;
    store.save(&raw)
}

/// In-memory store, used by tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `raw`.
    #[must_use]
    pub fn with_payload(raw: &str) -> Self {
        Self { slot: Some(raw.to_owned()) }
    }

    /// The raw payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, raw: &str) -> Result<(), PersistError> {
        self.slot = Some(raw.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.slot = None;
        Ok(())
    }
}

/// Browser `localStorage` under [`STORAGE_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        let window = web_sys::window().ok_or_else(|| PersistError::Storage("no window".to_owned()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(PersistError::Storage("localStorage disabled".to_owned())),
            Err(e) => Err(PersistError::Storage(format!("{e:?}"))),
        }
    }
}

impl StateStore for LocalStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn save(&mut self, raw: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(STORAGE_KEY, raw)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}
