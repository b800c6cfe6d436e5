//! Free-text catalog search.
//!
//! A pure projection over the book list: nothing here is persisted, and the
//! result is recomputed on every call.

use openbook_types::Book;

/// Returns `true` if `book` matches `query`.
///
/// The query is trimmed; an empty or whitespace-only query matches every
/// book. Otherwise the match is a case-insensitive substring test against
/// the concatenated title, author, and description.
pub fn matches(book: &Book, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {}",
        book.title.to_lowercase(),
        book.author.to_lowercase(),
        book.description.to_lowercase()
    );
    haystack.contains(&needle)
}

/// Filter `books` by `query`, preserving order.
pub fn filter<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    books.iter().filter(|b| matches(b, query)).collect()
}
