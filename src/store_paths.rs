//! Purpose: Shared store-directory and cart-name resolution helpers.
//! Exports: `default_store_dir` and `validate_cart_name`.
//! Role: Keep CLI and API-client naming semantics aligned from one source.
//! Invariants: Default store directory remains `~/.carton/carts`.
//! Invariants: Cart names must be non-empty and contain no path separators.

use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum CartNameError {
    Empty,
    ContainsPathSeparator,
}

pub(crate) fn default_store_dir() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_default();
    PathBuf::from(home).join(".carton").join("carts")
}

pub(crate) fn validate_cart_name(name: &str) -> Result<(), CartNameError> {
    if name.is_empty() {
        return Err(CartNameError::Empty);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CartNameError::ContainsPathSeparator);
    }
    Ok(())
}
