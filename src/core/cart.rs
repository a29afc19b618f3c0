//! Purpose: The cart storage adapter: add/list/clear over a key-value store.
//! Exports: `CartStore`, `CartOptions`, `DEFAULT_CART_KEY`.
//! Role: Translate cart operations into whole-value key-value reads/writes.
//! Invariants: The stored value is absent or a JSON array of items; it is
//! mutated only by whole-value append or whole-key removal.
//! Invariants: Corrupt stored state reads as empty and is logged, never fatal.

use crate::core::error::{Error, ErrorKind};
use crate::core::item::{CartItem, decode_items, encode_items};
use crate::core::store::KeyValueStore;

pub const DEFAULT_CART_KEY: &str = "cart-items";

#[derive(Clone, Debug)]
pub struct CartOptions {
    pub key: String,
    /// Remove the stored key when the store is dropped. Off by default; the
    /// caller opts in rather than losing carts on every session end.
    pub clear_on_session_end: bool,
}

impl CartOptions {
    pub fn new() -> Self {
        Self {
            key: DEFAULT_CART_KEY.to_string(),
            clear_on_session_end: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_clear_on_session_end(mut self, clear: bool) -> Self {
        self.clear_on_session_end = clear;
        self
    }
}

impl Default for CartOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    store: S,
    options: CartOptions,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, CartOptions::new())
    }

    pub fn with_options(store: S, options: CartOptions) -> Self {
        Self { store, options }
    }

    pub fn key(&self) -> &str {
        &self.options.key
    }

    pub fn options(&self) -> &CartOptions {
        &self.options
    }

    /// Append one item to the stored sequence and return the new item count.
    ///
    /// Reads the current sequence, appends, and writes the whole sequence
    /// back. Emits a confirmation event; presentation is the caller's call.
    pub fn add_item(&mut self, item: CartItem) -> Result<usize, Error> {
        let mut items = self.items()?;
        items.push(item);
        let encoded = encode_items(&items)?;
        self.store.set(&self.options.key, &encoded)?;
        if let Some(added) = items.last() {
            tracing::info!(
                key = %self.options.key,
                name = %added.name,
                count = items.len(),
                "item added to cart"
            );
        }
        Ok(items.len())
    }

    /// The stored sequence, or empty if nothing is stored. Never mutates.
    pub fn items(&self) -> Result<Vec<CartItem>, Error> {
        let Some(bytes) = self.store.get(&self.options.key)? else {
            return Ok(Vec::new());
        };
        match decode_items(&bytes) {
            Ok(items) => Ok(items),
            Err(err) if err.kind() == ErrorKind::Corrupt => {
                tracing::warn!(
                    key = %self.options.key,
                    error = %err,
                    "stored cart is corrupt; treating as empty"
                );
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Remove the stored key entirely. Idempotent.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.store.remove(&self.options.key)?;
        tracing::debug!(key = %self.options.key, "cart cleared");
        Ok(())
    }
}

impl<S: KeyValueStore> Drop for CartStore<S> {
    fn drop(&mut self) {
        if self.options.clear_on_session_end {
            // Best effort; drop must not panic or surface storage errors.
            let _ = self.store.remove(&self.options.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{CartOptions, CartStore, DEFAULT_CART_KEY};
    use crate::core::item::CartItem;
    use crate::core::store::{FileStore, KeyValueStore, MemoryStore};

    #[test]
    fn items_on_fresh_store_is_empty() {
        let cart = CartStore::new(MemoryStore::new());
        assert!(cart.items().expect("items").is_empty());
    }

    #[test]
    fn add_preserves_call_order() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        cart.add_item(CartItem::new("Hat", "$10")).expect("add");

        let items = cart.items().expect("items");
        assert_eq!(
            items,
            vec![CartItem::new("Shirt", "$20"), CartItem::new("Hat", "$10")]
        );
    }

    #[test]
    fn add_returns_the_new_count() {
        let mut cart = CartStore::new(MemoryStore::new());
        let count = cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        assert_eq!(count, 1);
        let count = cart.add_item(CartItem::new("Hat", "$10")).expect("add");
        assert_eq!(count, 2);
    }

    #[test]
    fn duplicate_items_are_kept() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(CartItem::new("Hat", "$10")).expect("add");
        cart.add_item(CartItem::new("Hat", "$10")).expect("add");
        assert_eq!(cart.items().expect("items").len(), 2);
    }

    #[test]
    fn clear_then_items_is_empty_and_idempotent() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(CartItem::new("Shirt", "$20")).expect("add");

        cart.clear().expect("clear");
        assert!(cart.items().expect("items").is_empty());

        cart.clear().expect("clear again");
        assert!(cart.items().expect("items").is_empty());
    }

    #[test]
    fn corrupt_stored_value_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEFAULT_CART_KEY, b"{{{not json").expect("set");

        let cart = CartStore::new(store);
        assert!(cart.items().expect("items").is_empty());
    }

    #[test]
    fn add_over_corrupt_state_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEFAULT_CART_KEY, b"\"wrong shape\"").expect("set");

        let mut cart = CartStore::new(store);
        cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        assert_eq!(cart.items().expect("items"), vec![CartItem::new("Shirt", "$20")]);
    }

    #[test]
    fn drop_without_session_policy_keeps_items() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut cart = CartStore::new(store.clone());
            cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        }
        assert!(store.get(DEFAULT_CART_KEY).expect("get").is_some());
    }

    #[test]
    fn drop_with_session_policy_clears_items() {
        let store = Arc::new(MemoryStore::new());
        {
            let options = CartOptions::new().with_clear_on_session_end(true);
            let mut cart = CartStore::with_options(store.clone(), options);
            cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        }
        assert!(store.get(DEFAULT_CART_KEY).expect("get").is_none());
    }

    #[test]
    fn file_backed_cart_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut cart = CartStore::new(FileStore::new(dir.path()));
            cart.add_item(CartItem::new("Shirt", "$20")).expect("add");
        }
        let cart = CartStore::new(FileStore::new(dir.path()));
        assert_eq!(cart.items().expect("items"), vec![CartItem::new("Shirt", "$20")]);
    }

    #[test]
    fn custom_key_isolates_carts() {
        let store = Arc::new(MemoryStore::new());
        let mut groceries = CartStore::with_options(
            store.clone(),
            CartOptions::new().with_key("groceries"),
        );
        let wishlist = CartStore::with_options(
            store.clone(),
            CartOptions::new().with_key("wishlist"),
        );

        groceries.add_item(CartItem::new("Milk", "$3")).expect("add");
        assert!(wishlist.items().expect("items").is_empty());
    }
}
