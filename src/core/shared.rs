//! Purpose: Process-wide shared access to one cart store.
//! Exports: `SharedCart`.
//! Role: Replace an ambient singleton with an injected, cloneable handle:
//! construct one store at application start, clone the handle where needed.
//! Invariants: Every clone observes the same underlying store.
//! Invariants: Operations serialize through one mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::cart::CartStore;
use crate::core::error::Error;
use crate::core::item::CartItem;
use crate::core::store::KeyValueStore;

pub struct SharedCart<S: KeyValueStore> {
    inner: Arc<Mutex<CartStore<S>>>,
}

impl<S: KeyValueStore> Clone for SharedCart<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedCart<S> {
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn add_item(&self, item: CartItem) -> Result<usize, Error> {
        self.lock().add_item(item)
    }

    pub fn items(&self) -> Result<Vec<CartItem>, Error> {
        self.lock().items()
    }

    pub fn clear(&self) -> Result<(), Error> {
        self.lock().clear()
    }

    fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        // The stored value is rewritten whole per operation; a panicked
        // writer cannot leave a torn sequence, so recover the lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedCart;
    use crate::core::cart::CartStore;
    use crate::core::item::CartItem;
    use crate::core::store::MemoryStore;

    #[test]
    fn clones_observe_each_others_writes() {
        let handle_a = SharedCart::new(CartStore::new(MemoryStore::new()));
        let handle_b = handle_a.clone();

        handle_a
            .add_item(CartItem::new("Shirt", "$20"))
            .expect("add");

        let items = handle_b.items().expect("items");
        assert_eq!(items, vec![CartItem::new("Shirt", "$20")]);
    }

    #[test]
    fn clear_through_one_handle_empties_all() {
        let handle_a = SharedCart::new(CartStore::new(MemoryStore::new()));
        let handle_b = handle_a.clone();

        handle_a.add_item(CartItem::new("Hat", "$10")).expect("add");
        handle_b.clear().expect("clear");

        assert!(handle_a.items().expect("items").is_empty());
    }

    #[test]
    fn shared_cart_is_usable_across_threads() {
        let handle = SharedCart::new(CartStore::new(MemoryStore::new()));
        let worker = handle.clone();

        let join = std::thread::spawn(move || {
            worker.add_item(CartItem::new("Shirt", "$20")).expect("add");
        });
        join.join().expect("join");

        assert_eq!(handle.items().expect("items").len(), 1);
    }
}
