//! Inventory domain module.
//!
//! Catalog items (albums and instruments) and the ledger that owns the
//! in-memory stock list, writing it through to the document store after
//! every mutation.

pub mod item;
pub mod ledger;
pub mod search;

pub use item::{Barcode, CatalogItem, ItemKind, ItemType};
pub use ledger::{AddOutcome, InventoryLedger, ItemEdit};
pub use search::SearchCriteria;
