//! Purpose: Define the stable public API boundary for carton.
//! Exports: Cart types and operations needed by the CLI and embedders.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only supported path to storage primitives.

mod client;

pub use crate::core::cart::{CartOptions, CartStore, DEFAULT_CART_KEY};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::item::CartItem;
pub use crate::core::shared::SharedCart;
pub use crate::core::store::{FileStore, KeyValueStore, MemoryStore, STORE_EXTENSION};
pub use client::{CartInfo, LocalClient};
