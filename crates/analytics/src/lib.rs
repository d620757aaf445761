//! Sales analytics.
//!
//! Read-only reports computed from the processed orders and the live
//! catalog. Nothing here is cached or persisted.

pub mod aggregator;
pub mod report;

pub use aggregator::SalesAnalytics;
pub use report::{ItemSales, SalesReport, TOP_SELLING_LIMIT};
