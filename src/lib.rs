//! Purpose: Shared core library crate used by the `carton` CLI and embedders.
//! Exports: `api` (stable surface) and `core` (stores, cart adapter, errors).
//! Role: Internal library backing the binary; `api` is the supported boundary.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
//! Invariants: No process-global cart state; sharing is an explicit handle.
pub mod api;
pub mod core;

pub(crate) mod store_paths;
