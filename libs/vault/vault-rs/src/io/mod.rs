//! Interactions with the document store and with account exports on disk.

pub mod export;
pub mod store;

pub use store::{AccountStore, MemoryAccountStore};
