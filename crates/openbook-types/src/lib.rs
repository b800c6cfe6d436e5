//! Foundation types for OpenBook.
//!
//! This crate provides the entity and identifier types shared by the rest of
//! the OpenBook system. Every other OpenBook crate depends on
//! `openbook-types`.
//!
//! # Key Types
//!
//! - [`BookId`] / [`UserId`] — opaque string identifiers
//! - [`Book`] — a catalog entry; [`BookPatch`] — a partial update to one
//! - [`User`] — a registered account (plaintext password, demo contract)
//! - [`Session`] — the public projection of the logged-in user
//! - [`Cart`] — book id → quantity mapping with a quantities-≥-1 invariant

pub mod book;
pub mod cart;
pub mod error;
pub mod id;
pub mod seed;
pub mod user;

pub use book::{Book, BookPatch, NewBook};
pub use cart::Cart;
pub use error::TypeError;
pub use id::{BookId, UserId};
pub use seed::{seed_books, seed_users};
pub use user::{Session, User};
