//! Storage slot backends
//!
//! The selection lives in exactly one string slot. Backends:
//! - Memory: shared ephemeral map (tests, embedded sessions)
//! - File: JSON object on disk (native)
//! - Local: `window.localStorage` (browser)
//!
//! Callers treat every error as "no persisted selection"; backends still
//! report them so the store can log what went wrong.

mod memory;
#[cfg(feature = "native")]
mod file;
#[cfg(feature = "wasm")]
mod local;

pub use memory::MemoryStorage;
#[cfg(feature = "native")]
pub use file::FileStorage;
#[cfg(feature = "wasm")]
pub use local::LocalStorage;

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

/// Storage enum - lets the store hold any backend without dyn traits
#[derive(Clone, Debug)]
pub enum Storage {
    Memory(MemoryStorage),
    #[cfg(feature = "native")]
    File(FileStorage),
    #[cfg(feature = "wasm")]
    Local(LocalStorage),
}

impl Storage {
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Storage::Memory(s) => s.get(key),
            #[cfg(feature = "native")]
            Storage::File(s) => s.get(key),
            #[cfg(feature = "wasm")]
            Storage::Local(s) => s.get(key),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Storage::Memory(s) => s.set(key, value),
            #[cfg(feature = "native")]
            Storage::File(s) => s.set(key, value),
            #[cfg(feature = "wasm")]
            Storage::Local(s) => s.set(key, value),
        }
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        match self {
            Storage::Memory(s) => s.remove(key),
            #[cfg(feature = "native")]
            Storage::File(s) => s.remove(key),
            #[cfg(feature = "wasm")]
            Storage::Local(s) => s.remove(key),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Storage::Memory(_) => "memory",
            #[cfg(feature = "native")]
            Storage::File(_) => "file",
            #[cfg(feature = "wasm")]
            Storage::Local(_) => "local",
        }
    }
}

impl From<MemoryStorage> for Storage {
    fn from(s: MemoryStorage) -> Self { Storage::Memory(s) }
}

#[cfg(feature = "native")]
impl From<FileStorage> for Storage {
    fn from(s: FileStorage) -> Self { Storage::File(s) }
}

#[cfg(feature = "wasm")]
impl From<LocalStorage> for Storage {
    fn from(s: LocalStorage) -> Self { Storage::Local(s) }
}
