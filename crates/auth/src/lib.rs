//! `musicshop-auth` — staff accounts, roles and the login session.
//!
//! Password hashing is delegated to a [`PasswordHasher`] supplied by the
//! caller; this crate never sees a plaintext password after hashing it.

pub mod authorize;
pub mod directory;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{authorize, AuthzError};
pub use directory::{DirectoryError, UserDirectory, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
pub use password::PasswordHasher;
pub use permissions::Permission;
pub use roles::Role;
pub use session::{AuthError, Session};
pub use user::User;
