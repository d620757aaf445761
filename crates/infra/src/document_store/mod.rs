//! Document store adapters.
//!
//! Implementations of [`musicshop_core::DocumentStore`]: a JSON-file backend
//! for real sessions and an in-memory backend for tests/dev.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;
