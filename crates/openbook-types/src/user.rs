use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A registered account.
///
/// The password is stored and compared in plaintext. That is the demo's
/// storage contract (`ob_users_v1` carries it verbatim); do not reuse this
/// type anywhere that needs real authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public projection of the currently logged-in user.
///
/// Deliberately has no password field, so the session document can never
/// leak credentials. Built only via [`Session::for_user`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl Session {
    /// Project a user into its session form, dropping the password.
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
