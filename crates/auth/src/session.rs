//! Login session for the single operator at the terminal.

use chrono::{DateTime, Utc};
use thiserror::Error;

use musicshop_core::{Committed, DocumentStore, Employee};

use crate::{DirectoryError, PasswordHasher, User, UserDirectory};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password; the two are not distinguished.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("account is disabled")]
    AccountDisabled,

    #[error("no user is logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Holds the currently authenticated user, if any.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login<S, H>(
        &mut self,
        directory: &mut UserDirectory<S, H>,
        username: &str,
        password: &str,
    ) -> Result<Committed<&User>, AuthError>
    where
        S: DocumentStore,
        H: PasswordHasher,
    {
        self.login_at(directory, username, password, Utc::now())
    }

    /// Authenticate and record `at` as the user's last login.
    ///
    /// The session is established even when saving `last_login` fails; the
    /// returned durability reports that save.
    pub fn login_at<S, H>(
        &mut self,
        directory: &mut UserDirectory<S, H>,
        username: &str,
        password: &str,
        at: DateTime<Utc>,
    ) -> Result<Committed<&User>, AuthError>
    where
        S: DocumentStore,
        H: PasswordHasher,
    {
        let user = match directory.find_by_username(username) {
            Some(user) if directory.verify_password(user, password) => user,
            _ => {
                tracing::warn!(username, "login failed");
                return Err(AuthError::InvalidCredentials);
            }
        };
        if !user.active {
            tracing::warn!(username, "login refused: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let mut user = user.clone();
        user.last_login = Some(at);
        let saved = directory.update_user(user.clone())?;

        tracing::info!(user_id = %user.id, username, role = %user.role, "logged in");
        let current: &User = self.current.insert(user);
        Ok(Committed::new(current, saved.durability))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, username = %user.username, "logged out");
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Identity to attribute processed orders to.
    pub fn require_employee(&self) -> Result<Employee, AuthError> {
        self.current
            .as_ref()
            .map(User::as_employee)
            .ok_or(AuthError::NotAuthenticated)
    }
}
