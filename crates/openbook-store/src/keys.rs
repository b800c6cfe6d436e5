//! Well-known document keys.
//!
//! These are a compatibility contract: any store written by another
//! OpenBook implementation uses exactly these strings, so they must never
//! change without a version bump in the suffix.

/// JSON array of `Book`.
pub const BOOKS: &str = "ob_books_v1";

/// JSON array of `User` (including the plaintext password field).
pub const USERS: &str = "ob_users_v1";

/// JSON object `{id,name,email}`, or JSON `null` when logged out.
pub const CURRENT_USER: &str = "ob_current_user_v1";

/// JSON object mapping book id → integer quantity.
pub const CART: &str = "ob_cart_v1";

/// All document keys, in a fixed order.
pub const ALL: [&str; 4] = [BOOKS, USERS, CURRENT_USER, CART];
