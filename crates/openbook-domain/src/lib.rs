//! Domain store for OpenBook.
//!
//! [`Bookstore`] owns the four documents (books, users, current session,
//! cart), applies every operation's invariants in memory, and persists each
//! changed document through `openbook-store`'s codec before returning.
//!
//! Control flow is strictly synchronous: the caller invokes an operation,
//! the operation mutates state and persists it, and the caller re-reads
//! through the accessors. There is no background work and no cross-document
//! transaction — each document is written independently.
//!
//! Authentication here is a simulation (plaintext passwords, no rate
//! limiting, no hashing); it exists to drive the demo's session flow and
//! nothing else.

pub mod bookstore;
pub mod error;
pub mod search;
pub mod view;

pub use bookstore::Bookstore;
pub use error::{DomainError, DomainResult};
pub use view::{CartLine, CartView};
