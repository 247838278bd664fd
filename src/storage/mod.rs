//! Persistence collaborators: key-value stores and the form repository
//! built on top of them.

mod file_store;
mod repository;
mod responses;
mod templates;

pub use file_store::FileStore;
pub use repository::{FormRepository, ShareId};
pub use responses::{
    validate_submission, FormResponses, ResponseLog, ResponseRecord, ResponseValue,
};
pub use templates::{predefined_templates, Template};

use std::collections::BTreeMap;

/// Errors raised while loading or saving form data
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed for `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data under `{key}`: {source}")]
    MalformedData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("data under `{key}` repeats field id `{id}`")]
    DuplicateId { key: String, id: String },

    #[error("form `{0}` not found")]
    FormNotFound(String),

    #[error("submission rejected: {0}")]
    Submission(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value persistence
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

/// In-memory store, used for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_error_messages_name_the_key() {
        let err = StorageError::DuplicateId {
            key: "fields".to_string(),
            id: "a".to_string(),
        };
        assert_eq!(err.to_string(), "data under `fields` repeats field id `a`");
    }
}
