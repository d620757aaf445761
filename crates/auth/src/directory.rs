//! Staff account directory backed by the `users` collection.

use thiserror::Error;

use musicshop_core::store::{load_or_empty, write_through};
use musicshop_core::{Collection, Committed, DocumentStore, DomainError, UserId};

use crate::{PasswordHasher, Role, User};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// All staff accounts, loaded once and written through on every change.
#[derive(Debug)]
pub struct UserDirectory<S, H> {
    store: S,
    hasher: H,
    users: Vec<User>,
}

impl<S, H> UserDirectory<S, H>
where
    S: DocumentStore,
    H: PasswordHasher,
{
    /// Load the `users` collection, seeding the default admin account when
    /// it is empty.
    pub fn open(store: S, hasher: H) -> Self {
        let users = load_or_empty(&store, Collection::Users);
        let mut directory = Self { store, hasher, users };

        if directory.users.is_empty() {
            tracing::info!(username = DEFAULT_ADMIN_USERNAME, "seeding default admin account");
            let admin = User::new(
                DEFAULT_ADMIN_USERNAME,
                directory.hasher.hash(DEFAULT_ADMIN_PASSWORD),
                Role::Admin,
            );
            directory.users.push(admin);
            directory.persist();
        }

        directory
    }

    pub fn create_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Committed<UserId>, DirectoryError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty").into());
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty").into());
        }
        if self.find_by_username(username).is_some() {
            tracing::warn!(username, "user creation rejected: duplicate username");
            return Err(DirectoryError::DuplicateUsername(username.to_string()));
        }

        let user = User::new(username, self.hasher.hash(password), role);
        let id = user.id;
        tracing::info!(%id, username, %role, "user created");
        self.users.push(user);

        Ok(Committed::new(id, self.persist()))
    }

    /// Exact, case-sensitive lookup.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn find_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    /// Replace the stored account with the same id and persist.
    pub fn update_user(&mut self, user: User) -> Result<Committed<()>, DirectoryError> {
        let Some(slot) = self.users.iter_mut().find(|existing| existing.id == user.id) else {
            return Err(DomainError::not_found(format!("user {}", user.id)).into());
        };
        *slot = user;
        Ok(Committed::new((), self.persist()))
    }

    pub(crate) fn verify_password(&self, user: &User, password: &str) -> bool {
        self.hasher.verify(password, &user.password_hash)
    }

    fn persist(&self) -> musicshop_core::Durability {
        write_through(&self.store, Collection::Users, &self.users)
    }
}
