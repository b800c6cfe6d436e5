use std::sync::Arc;

use tracing::debug;

use openbook_store::{codec, keys, KeyValueStore};
use openbook_types::{
    seed_books, seed_users, Book, BookId, BookPatch, Cart, NewBook, Session, User, UserId,
};

use crate::error::{DomainError, DomainResult};
use crate::search;
use crate::view::{self, CartView};

/// The domain store: owns the four documents and every operation over them.
///
/// All state is loaded once at [`open`](Self::open); each mutating
/// operation updates memory first, then persists exactly the documents it
/// changed. Reads go through the accessors and never touch the backend.
pub struct Bookstore {
    store: Arc<dyn KeyValueStore>,
    books: Vec<Book>,
    users: Vec<User>,
    session: Option<Session>,
    cart: Cart,
}

impl Bookstore {
    /// Open a bookstore over `store`.
    ///
    /// Each document loads independently; an absent or corrupt document
    /// falls back to its default (the seed catalog and seed accounts for
    /// books/users, logged-out and empty for session/cart). Loading never
    /// fails — the seed data is only written back on the first mutation of
    /// its document.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let books = codec::load(store.as_ref(), keys::BOOKS, seed_books());
        let users = codec::load(store.as_ref(), keys::USERS, seed_users());
        let session = codec::load(store.as_ref(), keys::CURRENT_USER, None);
        let cart = codec::load(store.as_ref(), keys::CART, Cart::new());
        Self {
            store,
            books,
            users,
            session,
            cart,
        }
    }

    // ---- Auth operations ----

    /// Register a new account and log it in.
    ///
    /// Fails with [`DomainError::DuplicateEmail`] — leaving the user list
    /// untouched — if any existing account has exactly this email
    /// (case-sensitive). On success the new user is appended, the session
    /// becomes its public projection, and both documents are persisted.
    pub fn signup(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> DomainResult<Session> {
        let email = email.into();
        if self.users.iter().any(|u| u.email == email) {
            return Err(DomainError::DuplicateEmail(email));
        }
        let user = User {
            id: UserId::generate(),
            name: name.into(),
            email,
            password: password.into(),
        };
        let session = Session::for_user(&user);
        self.users.push(user);
        self.session = Some(session.clone());
        self.persist_users()?;
        self.persist_session()?;
        debug!(user = %session.id, "signup complete");
        Ok(session)
    }

    /// Log in with an exact email/password match.
    ///
    /// Fails with [`DomainError::InvalidCredentials`] — leaving any current
    /// session in place — if no user matches both fields.
    pub fn login(&mut self, email: &str, password: &str) -> DomainResult<Session> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(DomainError::InvalidCredentials)?;
        let session = Session::for_user(user);
        self.session = Some(session.clone());
        self.persist_session()?;
        debug!(user = %session.id, "login");
        Ok(session)
    }

    /// Clear the session unconditionally. A no-op session-wise when already
    /// logged out, but the (null) session document is still persisted.
    pub fn logout(&mut self) -> DomainResult<()> {
        self.session = None;
        self.persist_session()
    }

    // ---- Catalog operations ----

    /// Add a book to the catalog with a fresh id.
    ///
    /// The new book is prepended so the catalog reads newest-first.
    /// Returns the stored book (id filled in, description defaulted,
    /// price clamped non-negative).
    pub fn add_book(&mut self, fields: NewBook) -> DomainResult<Book> {
        let book = Book::new(BookId::generate(), fields);
        self.books.insert(0, book.clone());
        self.persist_books()?;
        Ok(book)
    }

    /// Apply a partial patch to the book with `id`.
    ///
    /// Returns `Ok(false)` — without persisting — when no book matches;
    /// an unknown id is not an error.
    pub fn update_book(&mut self, id: &BookId, patch: &BookPatch) -> DomainResult<bool> {
        let Some(book) = self.books.iter_mut().find(|b| &b.id == id) else {
            return Ok(false);
        };
        patch.apply(book);
        self.persist_books()?;
        Ok(true)
    }

    /// Remove the book with `id` from the catalog.
    ///
    /// Returns `Ok(false)` when no book matches. Cart entries referencing
    /// the book are deliberately left alone; [`cart_view`](Self::cart_view)
    /// drops them lazily from the projection.
    pub fn delete_book(&mut self, id: &BookId) -> DomainResult<bool> {
        let before = self.books.len();
        self.books.retain(|b| &b.id != id);
        if self.books.len() == before {
            return Ok(false);
        }
        self.persist_books()?;
        Ok(true)
    }

    // ---- Cart operations ----

    /// Add `qty` of a book to the cart, incrementing any existing entry.
    ///
    /// The id is not checked against the catalog — an entry for a deleted
    /// or never-existing book is accepted and simply never resolves in the
    /// projection.
    pub fn add_to_cart(&mut self, id: &BookId, qty: u32) -> DomainResult<()> {
        self.cart.add(id.clone(), qty);
        self.persist_cart()
    }

    /// Drop the cart entry for `id` entirely, whatever its quantity.
    /// A no-op (still persisted) for an absent id.
    pub fn remove_from_cart(&mut self, id: &BookId) -> DomainResult<bool> {
        let removed = self.cart.remove(id);
        self.persist_cart()?;
        Ok(removed)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> DomainResult<()> {
        self.cart.clear();
        self.persist_cart()
    }

    /// Check out: requires a session, then unconditionally empties the cart.
    ///
    /// Fails with [`DomainError::NotAuthenticated`] — cart untouched — when
    /// logged out. No order record is created; the demo's checkout is the
    /// cart clear itself.
    pub fn checkout(&mut self) -> DomainResult<()> {
        if self.session.is_none() {
            return Err(DomainError::NotAuthenticated);
        }
        self.cart.clear();
        self.persist_cart()?;
        debug!("checkout complete");
        Ok(())
    }

    // ---- Projections ----

    /// Books matching a free-text query; see [`crate::search`].
    pub fn search(&self, query: &str) -> Vec<&Book> {
        search::filter(&self.books, query)
    }

    /// The cart resolved against the catalog, orphans dropped.
    pub fn cart_view(&self) -> CartView {
        view::project(&self.books, &self.cart)
    }

    // ---- Accessors ----

    /// The catalog, newest first.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All registered accounts.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The raw cart map (including any orphan entries).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Look up a book by id.
    pub fn find_book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    // ---- Persistence ----

    fn persist_books(&self) -> DomainResult<()> {
        codec::save(self.store.as_ref(), keys::BOOKS, &self.books)?;
        Ok(())
    }

    fn persist_users(&self) -> DomainResult<()> {
        codec::save(self.store.as_ref(), keys::USERS, &self.users)?;
        Ok(())
    }

    fn persist_session(&self) -> DomainResult<()> {
        codec::save(self.store.as_ref(), keys::CURRENT_USER, &self.session)?;
        Ok(())
    }

    fn persist_cart(&self) -> DomainResult<()> {
        codec::save(self.store.as_ref(), keys::CART, &self.cart)?;
        Ok(())
    }
}

impl std::fmt::Debug for Bookstore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bookstore")
            .field("books", &self.books.len())
            .field("users", &self.users.len())
            .field("logged_in", &self.session.is_some())
            .field("cart_entries", &self.cart.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openbook_store::{FileKeyValueStore, InMemoryKeyValueStore};

    fn open_memory() -> Bookstore {
        Bookstore::open(Arc::new(InMemoryKeyValueStore::new()))
    }

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: "Anon".into(),
            description: None,
            price: 10.0,
            available: true,
        }
    }

    // -----------------------------------------------------------------------
    // Opening and seeding
    // -----------------------------------------------------------------------

    #[test]
    fn open_empty_store_seeds_defaults() {
        let bs = open_memory();
        assert_eq!(bs.books().len(), 2);
        assert_eq!(bs.users().len(), 2);
        assert!(bs.session().is_none());
        assert!(bs.cart().is_empty());
    }

    #[test]
    fn open_prefers_stored_documents_over_seed() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set(keys::BOOKS, "[]").unwrap();
        let bs = Bookstore::open(store);
        assert!(bs.books().is_empty());
        // Users key was absent, so the user seed still applies.
        assert_eq!(bs.users().len(), 2);
    }

    #[test]
    fn open_with_corrupt_document_falls_back() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set(keys::BOOKS, "{truncated").unwrap();
        store.set(keys::CART, "also not json").unwrap();
        let bs = Bookstore::open(store);
        assert_eq!(bs.books().len(), 2);
        assert!(bs.cart().is_empty());
    }

    // -----------------------------------------------------------------------
    // Signup
    // -----------------------------------------------------------------------

    #[test]
    fn signup_appends_user_and_logs_in() {
        let mut bs = open_memory();
        let session = bs.signup("Carol", "carol@example.com", "pw").unwrap();
        assert_eq!(session.email, "carol@example.com");
        assert_eq!(bs.users().len(), 3);
        assert_eq!(bs.session(), Some(&session));
    }

    #[test]
    fn signup_duplicate_email_fails_and_changes_nothing() {
        let mut bs = open_memory();
        let err = bs.signup("Eve", "alice@example.com", "pw").unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
        assert_eq!(bs.users().len(), 2);
        assert!(bs.session().is_none());
    }

    #[test]
    fn signup_email_match_is_case_sensitive() {
        let mut bs = open_memory();
        // Different case is a different email under this contract.
        assert!(bs.signup("Al", "ALICE@example.com", "pw").is_ok());
        assert_eq!(bs.users().len(), 3);
    }

    #[test]
    fn signup_persists_users_and_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut bs = Bookstore::open(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        bs.signup("Carol", "carol@example.com", "pw").unwrap();
        assert!(store.get(keys::USERS).unwrap().is_some());
        assert!(store.get(keys::CURRENT_USER).unwrap().is_some());
    }

    // -----------------------------------------------------------------------
    // Login / logout
    // -----------------------------------------------------------------------

    #[test]
    fn login_sets_public_session() {
        let mut bs = open_memory();
        let session = bs.login("alice@example.com", "secret1").unwrap();
        assert_eq!(session.id, UserId::from("u1"));
        assert_eq!(session.name, "Alice Example");
        // The session document never carries the password.
        let json = serde_json::to_value(bs.session().unwrap()).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn login_wrong_password_keeps_session() {
        let mut bs = open_memory();
        bs.login("alice@example.com", "secret1").unwrap();
        let err = bs.login("alice@example.com", "wrong").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(bs.session().unwrap().id, UserId::from("u1"));
    }

    #[test]
    fn login_unknown_email_fails() {
        let mut bs = open_memory();
        let err = bs.login("nobody@example.com", "secret1").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert!(bs.session().is_none());
    }

    #[test]
    fn logout_clears_and_persists_null_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut bs = Bookstore::open(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        bs.login("bob@example.com", "secret2").unwrap();
        bs.logout().unwrap();
        assert!(!bs.is_logged_in());
        assert_eq!(store.get(keys::CURRENT_USER).unwrap().as_deref(), Some("null"));
    }

    // -----------------------------------------------------------------------
    // Catalog CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn add_book_prepends_with_fresh_id() {
        let mut bs = open_memory();
        let added = bs
            .add_book(NewBook {
                title: "Refactoring".into(),
                author: "Martin Fowler".into(),
                description: Some("Improving the design of existing code.".into()),
                price: 39.5,
                available: false,
            })
            .unwrap();
        // Newest-first ordering.
        assert_eq!(bs.books()[0].id, added.id);
        let found = bs.find_book(&added.id).unwrap();
        assert_eq!(found.title, "Refactoring");
        assert_eq!(found.price, 39.5);
        assert!(!found.available);
    }

    #[test]
    fn add_book_defaults_description_and_clamps_price() {
        let mut bs = open_memory();
        let added = bs
            .add_book(NewBook {
                title: "Freebie".into(),
                author: "A".into(),
                description: None,
                price: -3.0,
                available: true,
            })
            .unwrap();
        assert_eq!(added.description, "");
        assert_eq!(added.price, 0.0);
    }

    #[test]
    fn update_book_patches_only_named_fields() {
        let mut bs = open_memory();
        let id = BookId::from("b1");
        let patch = BookPatch {
            available: Some(false),
            ..BookPatch::default()
        };
        assert!(bs.update_book(&id, &patch).unwrap());
        let book = bs.find_book(&id).unwrap();
        assert!(!book.available);
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.price, 29.99);
    }

    #[test]
    fn update_missing_book_is_silent_noop() {
        let mut bs = open_memory();
        let patch = BookPatch {
            title: Some("x".into()),
            ..BookPatch::default()
        };
        assert!(!bs.update_book(&BookId::from("ghost"), &patch).unwrap());
        assert_eq!(bs.books().len(), 2);
    }

    #[test]
    fn delete_book_removes_only_match() {
        let mut bs = open_memory();
        assert!(bs.delete_book(&BookId::from("b1")).unwrap());
        assert!(bs.find_book(&BookId::from("b1")).is_none());
        assert_eq!(bs.books().len(), 1);
        assert!(!bs.delete_book(&BookId::from("b1")).unwrap());
    }

    // -----------------------------------------------------------------------
    // Cart
    // -----------------------------------------------------------------------

    #[test]
    fn add_to_cart_accumulates() {
        let mut bs = open_memory();
        let id = BookId::from("b1");
        bs.add_to_cart(&id, 1).unwrap();
        bs.add_to_cart(&id, 2).unwrap();
        assert_eq!(bs.cart().quantity(&id), Some(3));
    }

    #[test]
    fn remove_from_cart_missing_is_noop() {
        let mut bs = open_memory();
        assert!(!bs.remove_from_cart(&BookId::from("ghost")).unwrap());
        assert!(bs.cart().is_empty());
    }

    #[test]
    fn deleted_book_still_enters_cart_but_not_the_view() {
        let mut bs = open_memory();
        let id = BookId::from("b1");
        bs.delete_book(&id).unwrap();
        bs.add_to_cart(&id, 2).unwrap();
        // The raw entry exists...
        assert_eq!(bs.cart().quantity(&id), Some(2));
        // ...but the projection drops the orphan.
        assert!(bs.cart_view().is_empty());
    }

    #[test]
    fn cart_view_totals_resolved_lines() {
        let mut bs = open_memory();
        bs.add_to_cart(&BookId::from("b1"), 2).unwrap();
        bs.add_to_cart(&BookId::from("b2"), 1).unwrap();
        let view = bs.cart_view();
        assert_eq!(view.lines.len(), 2);
        assert!((view.total - (2.0 * 29.99 + 24.99)).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // Checkout
    // -----------------------------------------------------------------------

    #[test]
    fn checkout_requires_session_and_keeps_cart() {
        let mut bs = open_memory();
        bs.add_to_cart(&BookId::from("b1"), 1).unwrap();
        let err = bs.checkout().unwrap_err();
        assert!(matches!(err, DomainError::NotAuthenticated));
        assert_eq!(bs.cart().quantity(&BookId::from("b1")), Some(1));
    }

    #[test]
    fn checkout_with_session_empties_cart() {
        let mut bs = open_memory();
        bs.login("alice@example.com", "secret1").unwrap();
        bs.add_to_cart(&BookId::from("b1"), 3).unwrap();
        bs.add_to_cart(&BookId::from("nonexistent"), 1).unwrap();
        bs.checkout().unwrap();
        assert!(bs.cart().is_empty());
    }

    #[test]
    fn checkout_of_empty_cart_still_succeeds() {
        let mut bs = open_memory();
        bs.login("alice@example.com", "secret1").unwrap();
        bs.checkout().unwrap();
        assert!(bs.cart().is_empty());
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    #[test]
    fn search_seed_data_for_clean() {
        let bs = open_memory();
        let hits = bs.search("clean");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Clean Code");
    }

    #[test]
    fn search_empty_query_returns_all() {
        let bs = open_memory();
        assert_eq!(bs.search("").len(), 2);
    }

    // -----------------------------------------------------------------------
    // Persistence and durability
    // -----------------------------------------------------------------------

    #[test]
    fn mutations_survive_reopen_in_memory() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        let added = {
            let mut bs = Bookstore::open(Arc::clone(&store));
            bs.login("alice@example.com", "secret1").unwrap();
            let added = bs.add_book(new_book("Persisted")).unwrap();
            bs.add_to_cart(&added.id, 2).unwrap();
            added
        };
        let bs = Bookstore::open(store);
        assert_eq!(bs.find_book(&added.id).unwrap().title, "Persisted");
        assert_eq!(bs.session().unwrap().id, UserId::from("u1"));
        assert_eq!(bs.cart().quantity(&added.id), Some(2));
    }

    #[test]
    fn mutations_survive_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let added = {
            let store = FileKeyValueStore::open(dir.path()).unwrap();
            let mut bs = Bookstore::open(Arc::new(store));
            let added = bs.add_book(new_book("Durable")).unwrap();
            bs.delete_book(&BookId::from("b2")).unwrap();
            added
        };
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        let bs = Bookstore::open(Arc::new(store));
        assert!(bs.find_book(&added.id).is_some());
        assert!(bs.find_book(&BookId::from("b2")).is_none());
    }

    #[test]
    fn documents_use_the_compat_keys() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut bs = Bookstore::open(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        bs.add_book(new_book("X")).unwrap();
        bs.signup("Carol", "carol@example.com", "pw").unwrap();
        bs.add_to_cart(&BookId::from("b1"), 1).unwrap();
        for key in [keys::BOOKS, keys::USERS, keys::CURRENT_USER, keys::CART] {
            assert!(store.get(key).unwrap().is_some(), "missing document {key}");
        }
        // Cart wire format: flat object, id → integer quantity.
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some(r#"{"b1":1}"#));
    }
}
