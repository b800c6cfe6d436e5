use openbook_store::StoreError;
use thiserror::Error;

/// Errors surfaced by domain operations.
///
/// The first three are expected outcomes the presentation layer turns into
/// inline messages; `Store` means the backend itself failed and is the only
/// unrecoverable case.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Signup attempted with an email that already has an account.
    #[error("an account already exists for {0}")]
    DuplicateEmail(String),

    /// Login with an email/password pair that matches no user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Checkout attempted with no active session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The backing store failed to persist a document.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
