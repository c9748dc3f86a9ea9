//! Board Persistence
//!
//! The whole board is one JSON array of column records under a single key,
//! rewritten on every change.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{CardRecord, ColumnRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("could not encode board: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not decode board: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Column-keyed persistence used by the board and the reorder engine
pub trait ColumnStore {
    /// Every stored column, in storage order
    fn load_all(&self) -> Result<Vec<ColumnRecord>, StoreError>;

    fn get_column(&self, column_id: &str) -> Result<Option<ColumnRecord>, StoreError>;

    /// Upsert by id
    fn save_column(&mut self, record: &ColumnRecord) -> Result<(), StoreError>;

    fn remove_card_from_column(&mut self, column_id: &str, card_id: &str) -> Result<(), StoreError>;

    /// Append a card record to an existing column
    fn add_card_to_column(&mut self, column_id: &str, card: &CardRecord) -> Result<(), StoreError>;

    fn clear_all(&mut self) -> Result<(), StoreError>;
}

/// String key-value storage underneath a `JsonColumnStore`
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process backend; also the fallback when browser storage is missing
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryBackend {
    /// A backend whose writes always fail
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        self.entries.remove(key);
        Ok(())
    }
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

fn js_err(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(js_err)
    }
}

/// Column store serialized as one JSON array
pub struct JsonColumnStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> JsonColumnStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Key an undecodable board is moved to by `set_aside_unreadable`
    pub fn unreadable_key(&self) -> String {
        format!("{}.unreadable", self.key)
    }

    /// Move a payload that no longer decodes out of the board's key, so the
    /// board can start empty without losing it. Returns whether anything moved.
    pub fn set_aside_unreadable(&mut self) -> Result<bool, StoreError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(false);
        };
        if serde_json::from_str::<Vec<ColumnRecord>>(&raw).is_ok() {
            return Ok(false);
        }
        let backup = self.unreadable_key();
        self.backend.set(&backup, &raw)?;
        self.backend.remove(&self.key)?;
        tracing::warn!("[STORE] unreadable board moved from {} to {}", self.key, backup);
        Ok(true)
    }

    fn write_all(&mut self, records: &[ColumnRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records).map_err(StoreError::Encode)?;
        self.backend.set(&self.key, &json)
    }
}

impl<B: KeyValueBackend> ColumnStore for JsonColumnStore<B> {
    fn load_all(&self) -> Result<Vec<ColumnRecord>, StoreError> {
        match self.backend.get(&self.key)? {
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn get_column(&self, column_id: &str) -> Result<Option<ColumnRecord>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|c| c.id == column_id))
    }

    fn save_column(&mut self, record: &ColumnRecord) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        match records.iter_mut().find(|c| c.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records)
    }

    fn remove_card_from_column(&mut self, column_id: &str, card_id: &str) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        let Some(column) = records.iter_mut().find(|c| c.id == column_id) else {
            tracing::debug!("[STORE] remove from unknown column {}", column_id);
            return Ok(());
        };
        column.cards.retain(|c| c.id != card_id);
        self.write_all(&records)
    }

    fn add_card_to_column(&mut self, column_id: &str, card: &CardRecord) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        let column = records
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| StoreError::UnknownColumn(column_id.to_string()))?;
        column.cards.push(card.clone());
        self.write_all(&records)
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)
    }
}
