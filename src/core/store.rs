//! Purpose: Key-value storage backends for serialized carts.
//! Exports: `KeyValueStore`, `FileStore`, `MemoryStore`, `STORE_EXTENSION`.
//! Role: Isolate cart logic from the storage medium; swapping media means
//! implementing only this three-method contract.
//! Invariants: `get` of an absent key is `Ok(None)`, never an error.
//! Invariants: `remove` is idempotent; removing an absent key succeeds.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::error::{Error, ErrorKind};
use crate::store_paths::{CartNameError, validate_cart_name};

pub const STORE_EXTENSION: &str = "carton";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error>;
    fn remove(&self, key: &str) -> Result<(), Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key)
    }
}

/// One file per key under a store directory, `<dir>/<key>.carton`.
///
/// The directory is created on first write. Reads and writes are whole-file;
/// concurrent writers are not arbitrated.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_path(&self, key: &str) -> Result<PathBuf, Error> {
        validate_cart_name(key).map_err(|err| invalid_key_error(key, err))?;
        Ok(self.dir.join(format!("{key}.{STORE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let path = self.key_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::new(io_error_kind(&err))
                .with_message("failed to read stored value")
                .with_key(key)
                .with_path(&path)
                .with_source(err)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| {
            Error::new(io_error_kind(&err))
                .with_message("failed to create store directory")
                .with_path(&self.dir)
                .with_source(err)
        })?;
        fs::write(&path, value).map_err(|err| {
            Error::new(io_error_kind(&err))
                .with_message("failed to write stored value")
                .with_key(key)
                .with_path(&path)
                .with_source(err)
        })
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::new(io_error_kind(&err))
                .with_message("failed to remove stored value")
                .with_key(key)
                .with_path(&path)
                .with_source(err)),
        }
    }
}

/// In-process store for tests and ephemeral carts. Per instance, not global.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panicked writer leaves the map in a readable state; keep going.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        self.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.lock().remove(key);
        Ok(())
    }
}

pub(crate) fn invalid_key_error(key: &str, err: CartNameError) -> Error {
    match err {
        CartNameError::Empty => Error::new(ErrorKind::Usage)
            .with_message("cart name must not be empty")
            .with_hint("Use a short name like `groceries`."),
        CartNameError::ContainsPathSeparator => Error::new(ErrorKind::Usage)
            .with_message("cart name must not contain path separators")
            .with_key(key)
            .with_hint("Use `--dir` to choose the store directory instead."),
    }
}

fn io_error_kind(err: &io::Error) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::PermissionDenied
        | io::ErrorKind::StorageFull
        | io::ErrorKind::QuotaExceeded => ErrorKind::Unavailable,
        _ => ErrorKind::Io,
    }
}
