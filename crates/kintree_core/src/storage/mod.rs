//! Persistence adapter boundary.
//!
//! # Responsibility
//! - Define the load/save contract the core uses to persist the record list
//!   under a storage key.
//! - Keep serialization details out of store and service logic.
//!
//! # Invariants
//! - `load` distinguishes "nothing stored yet" (`Ok(None)`) from a transport
//!   or decode failure.
//! - Read paths reject undecodable persisted state instead of masking it.

use crate::model::member::Member;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_kv;

pub use sqlite_kv::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from persistence adapters.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Stored schema is newer than this binary supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Persisted or outgoing payload cannot be (de)serialized.
    InvalidPayload(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidPayload(message) => write!(f, "invalid stored payload: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::InvalidPayload(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Load/save contract for the full record collection.
///
/// Save is whole-collection replacement; adapters never merge.
pub trait StorageAdapter {
    /// Loads the stored collection, or `None` when nothing was stored yet.
    fn load(&self) -> StorageResult<Option<Vec<Member>>>;
    /// Persists the full collection, replacing any previous content.
    fn save(&self, members: &[Member]) -> StorageResult<()>;
}

/// In-process adapter for tests and smoke probes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<Vec<Member>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts pre-populated, as if a previous session had saved.
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            slot: RefCell::new(Some(members)),
        }
    }

    /// Returns the last saved collection, if any.
    pub fn saved(&self) -> Option<Vec<Member>> {
        self.slot.borrow().clone()
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self) -> StorageResult<Option<Vec<Member>>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, members: &[Member]) -> StorageResult<()> {
        *self.slot.borrow_mut() = Some(members.to_vec());
        Ok(())
    }
}
