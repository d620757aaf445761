//! Sales orders domain module.
//!
//! Cart assembly, totals, employee attribution and the processor that owns
//! the persisted order list.

pub mod order;
pub mod processor;

pub use order::{Customer, Order, OrderId, OrderStatus};
pub use processor::OrderProcessor;
