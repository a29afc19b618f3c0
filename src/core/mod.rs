// Core modules implementing storage, cart state, and error modeling.
pub mod cart;
pub mod error;
pub mod item;
pub mod shared;
pub mod store;
