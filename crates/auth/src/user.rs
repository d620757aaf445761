//! Staff account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use musicshop_core::{Employee, UserId};

use crate::Role;

/// A staff account as persisted in the `users` collection.
///
/// `password_hash` is opaque: only the [`crate::PasswordHasher`] that
/// produced it can check a password against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// New, active account that has never logged in.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            active: true,
            last_login: None,
        }
    }

    /// Identity recorded on orders this user processes.
    pub fn as_employee(&self) -> Employee {
        Employee::new(self.id, self.username.clone())
    }
}
