//! `musicshop-core` — shared building blocks for the back-office services.
//!
//! Pure domain primitives plus the storage contract the services write
//! through to. No filesystem access lives here.

pub mod error;
pub mod id;
pub mod money;
pub mod store;

pub use error::{DomainError, DomainResult};
pub use id::{Employee, UserId};
pub use money::Money;
pub use store::{Collection, Committed, DocumentStore, Durability, StoreError};
