//! Persistence layer for OpenBook.
//!
//! Every piece of OpenBook state is one of four JSON documents written
//! through a plain string key → string value mapping. This crate provides:
//!
//! - [`KeyValueStore`] — the durable mapping trait
//! - [`InMemoryKeyValueStore`] — `HashMap`-based backend for tests and embedding
//! - [`FileKeyValueStore`] — file-per-key backend for durable local state
//! - [`codec`] — `load`/`save` of typed documents as JSON text
//! - [`keys`] — the well-known document key constants
//!
//! # Design Rules
//!
//! 1. The store never interprets values; it is a pure key-value mapping.
//! 2. `codec::load` never fails: a missing, unreadable, or corrupt document
//!    falls back to a caller-supplied default (corruption is logged).
//! 3. `codec::save` propagates backend failure; there is no retry layer.
//! 4. Documents are independent. There is no cross-key transaction.

pub mod codec;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
