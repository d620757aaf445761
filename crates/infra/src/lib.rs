//! Infrastructure layer: document store backends and configuration.

pub mod config;
pub mod document_store;

#[cfg(test)]
mod integration_tests;

pub use config::StoreConfig;
pub use document_store::{InMemoryDocumentStore, JsonFileStore};
