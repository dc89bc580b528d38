pub mod types;

// Re-export all record types for easier access from other crates
pub use types::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Tagged failure kinds. The transport layer maps these to HTTP status codes
/// instead of substring-matching error text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Validation(_) => 400,
            StoreError::Io(_) | StoreError::Json(_) => 500,
        }
    }
}

/// One persisted entity type: a record with an integer id, a partial-update
/// patch, and create-time validation.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Patch;

    /// Conventional file name for the entity's flat-file store.
    const FILE_NAME: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);

    /// Shallow merge: fields present in the patch overwrite, the rest stay.
    fn merge(&mut self, patch: Self::Patch);

    fn validate(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub trait IdStrategy {
    fn next_id(&self, existing: &[u64]) -> u64;
}

/// max(existing ids) + 1, or 1 for an empty store.
pub struct MaxPlusOne;

impl IdStrategy for MaxPlusOne {
    fn next_id(&self, existing: &[u64]) -> u64 {
        existing.iter().copied().max().map_or(1, |max| max + 1)
    }
}

/// Entity store contract. `update` returns `None` when the id does not
/// exist; `delete` reports whether anything was removed.
pub trait Store<R: Record> {
    fn find_all(&self) -> Result<Vec<R>, StoreError>;
    fn find_by_id(&self, id: u64) -> Result<Option<R>, StoreError>;
    fn create(&self, record: R) -> Result<R, StoreError>;
    fn update(&self, id: u64, patch: R::Patch) -> Result<Option<R>, StoreError>;
    fn delete(&self, id: u64) -> Result<bool, StoreError>;
}

/// One JSON array per entity type, read and rewritten wholesale on every
/// mutation. No locking and no partial I/O: two concurrent writers race and
/// the later whole-file write wins. That is an accepted limitation, not a
/// guarantee to build on.
pub struct JsonFileStore<R, G = MaxPlusOne> {
    path: PathBuf,
    ids: G,
    _record: PhantomData<R>,
}

impl<R: Record> JsonFileStore<R> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_ids(path, MaxPlusOne)
    }
}

impl<R: Record, G: IdStrategy> JsonFileStore<R, G> {
    pub fn with_ids(path: impl Into<PathBuf>, ids: G) -> Self {
        JsonFileStore {
            path: path.into(),
            ids,
            _record: PhantomData,
        }
    }

    /// Writes the initial array, replacing whatever the file held.
    pub fn seed(&self, records: &[R]) -> Result<(), StoreError> {
        self.save(records)
    }

    fn load(&self) -> Result<Vec<R>, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, records: &[R]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl<R: Record, G: IdStrategy> Store<R> for JsonFileStore<R, G> {
    fn find_all(&self) -> Result<Vec<R>, StoreError> {
        self.load()
    }

    fn find_by_id(&self, id: u64) -> Result<Option<R>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.id() == id))
    }

    fn create(&self, mut record: R) -> Result<R, StoreError> {
        record.validate()?;
        let mut records = self.load()?;
        let ids: Vec<u64> = records.iter().map(|r| r.id()).collect();
        record.set_id(self.ids.next_id(&ids));
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    fn update(&self, id: u64, patch: R::Patch) -> Result<Option<R>, StoreError> {
        let mut records = self.load()?;
        let Some(target) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        target.merge(patch);
        let updated = target.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }
}

/// In-memory store with the same contract, for tests and for callers that
/// want to substitute a fake for the flat files.
pub struct MemStore<R, G = MaxPlusOne> {
    records: Mutex<Vec<R>>,
    ids: G,
}

impl<R: Record> MemStore<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<R>) -> Self {
        MemStore {
            records: Mutex::new(records),
            ids: MaxPlusOne,
        }
    }
}

impl<R: Record> Default for MemStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, G: IdStrategy> MemStore<R, G> {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<R>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R: Record, G: IdStrategy> Store<R> for MemStore<R, G> {
    fn find_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.lock().clone())
    }

    fn find_by_id(&self, id: u64) -> Result<Option<R>, StoreError> {
        Ok(self.lock().iter().find(|r| r.id() == id).cloned())
    }

    fn create(&self, mut record: R) -> Result<R, StoreError> {
        record.validate()?;
        let mut records = self.lock();
        let ids: Vec<u64> = records.iter().map(|r| r.id()).collect();
        record.set_id(self.ids.next_id(&ids));
        records.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: u64, patch: R::Patch) -> Result<Option<R>, StoreError> {
        let mut records = self.lock();
        let Some(target) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        target.merge(patch);
        Ok(Some(target.clone()))
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}
