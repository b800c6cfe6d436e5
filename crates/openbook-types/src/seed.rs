//! Default catalog and account data used on first run, when the backing
//! store has no documents yet. Ids are fixed literals so a fresh install
//! is reproducible.

use crate::book::Book;
use crate::id::{BookId, UserId};
use crate::user::User;

/// The two sample books shipped with a fresh store.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: BookId::from("b1"),
            title: "Clean Code".into(),
            author: "Robert C. Martin".into(),
            description: "A handbook of agile software craftsmanship.".into(),
            price: 29.99,
            available: true,
        },
        Book {
            id: BookId::from("b2"),
            title: "The Pragmatic Programmer".into(),
            author: "Andrew Hunt".into(),
            description: "Your journey to mastery.".into(),
            price: 24.99,
            available: true,
        },
    ]
}

/// The two sample accounts shipped with a fresh store.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: UserId::from("u1"),
            name: "Alice Example".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
        },
        User {
            id: UserId::from("u2"),
            name: "Bob Example".into(),
            email: "bob@example.com".into(),
            password: "secret2".into(),
        },
    ]
}
