//! Purpose: Resolve named carts against a local store directory.
//! Exports: `LocalClient`, `CartInfo`, and cart lifecycle operations.
//! Role: Stable boundary for the CLI and embedders; one cart per store key.
//! Invariants: Cart names must be non-empty with no path separators.
//! Invariants: Opening a cart never creates the stored key; first add does.

use std::path::{Path, PathBuf};

use crate::core::cart::{CartOptions, CartStore};
use crate::core::error::{Error, ErrorKind};
use crate::core::shared::SharedCart;
use crate::core::store::{FileStore, KeyValueStore, STORE_EXTENSION, invalid_key_error};
use crate::store_paths::{default_store_dir, validate_cart_name};

pub type ApiResult<T> = Result<T, Error>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartInfo {
    pub name: String,
    pub path: PathBuf,
    pub items: usize,
}

#[derive(Clone, Debug)]
pub struct LocalClient {
    store_dir: PathBuf,
}

impl LocalClient {
    pub fn new() -> Self {
        Self {
            store_dir: default_store_dir(),
        }
    }

    pub fn with_store_dir(mut self, store_dir: impl Into<PathBuf>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Open the named cart. The name becomes the storage key; any key set on
    /// `options` is replaced.
    pub fn open_cart(&self, name: &str, options: CartOptions) -> ApiResult<CartStore<FileStore>> {
        validate_cart_name(name).map_err(|err| invalid_key_error(name, err))?;
        let store = FileStore::new(&self.store_dir);
        Ok(CartStore::with_options(store, options.with_key(name)))
    }

    /// Open the named cart behind a cloneable shared handle.
    pub fn shared_cart(&self, name: &str, options: CartOptions) -> ApiResult<SharedCart<FileStore>> {
        Ok(SharedCart::new(self.open_cart(name, options)?))
    }

    /// Remove the named cart's stored key. Idempotent, like `clear`.
    pub fn delete_cart(&self, name: &str) -> ApiResult<()> {
        validate_cart_name(name).map_err(|err| invalid_key_error(name, err))?;
        FileStore::new(&self.store_dir).remove(name)
    }

    /// Enumerate carts in the store directory with lenient item counts.
    /// A missing store directory is an empty list, not an error.
    pub fn list_carts(&self) -> ApiResult<Vec<CartInfo>> {
        let entries = match std::fs::read_dir(&self.store_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(Error::new(ErrorKind::Io)
                    .with_message("failed to read store directory")
                    .with_path(&self.store_dir)
                    .with_source(err));
            }
        };

        let mut carts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read store directory entry")
                    .with_path(&self.store_dir)
                    .with_source(err)
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(STORE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let cart = self.open_cart(name, CartOptions::new())?;
            carts.push(CartInfo {
                name: name.to_string(),
                path: path.clone(),
                items: cart.items()?.len(),
            });
        }

        carts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(carts)
    }
}

impl Default for LocalClient {
    fn default() -> Self {
        Self::new()
    }
}
