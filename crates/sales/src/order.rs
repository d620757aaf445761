use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use musicshop_core::{DomainError, DomainResult, Employee, Money, UserId};
use musicshop_inventory::CatalogItem;

/// Order identifier (`ORD-` followed by a UUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub const PREFIX: &'static str = "ORD-";

    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order status lifecycle.
///
/// Only `Pending -> Processed` has a transition today; `Completed` and
/// `Cancelled` can be read from storage but nothing moves an order there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processed,
    Completed,
    Cancelled,
}

/// Customer reference carried on an order. Not checked against any store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A customer order: cart lines, derived total and processing attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_id: OrderId,
    customer: Customer,
    cart_items: Vec<CatalogItem>,
    total_amount: Money,
    order_date: DateTime<Utc>,
    processed_by_id: Option<UserId>,
    processed_by: Option<String>,
    status: OrderStatus,
}

impl Order {
    /// New pending order with an empty cart.
    pub fn new(customer: Customer, order_date: DateTime<Utc>) -> Self {
        Self {
            order_id: OrderId::generate(),
            customer,
            cart_items: Vec::new(),
            total_amount: Money::ZERO,
            order_date,
            processed_by_id: None,
            processed_by: None,
            status: OrderStatus::Pending,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn cart_items(&self) -> &[CatalogItem] {
        &self.cart_items
    }

    pub fn item_count(&self) -> usize {
        self.cart_items.len()
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn processed_by_id(&self) -> Option<UserId> {
        self.processed_by_id
    }

    pub fn processed_by(&self) -> Option<&str> {
        self.processed_by.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }

    /// Append a cart line and recompute the total from every line.
    pub fn add_item(&mut self, item: CatalogItem) -> DomainResult<Money> {
        if !self.is_pending() {
            return Err(DomainError::invariant(
                "cannot modify order once it has left pending",
            ));
        }
        self.cart_items.push(item);
        self.total_amount = self.recompute_total();
        Ok(self.total_amount)
    }

    fn recompute_total(&self) -> Money {
        self.cart_items.iter().map(CatalogItem::price).sum()
    }

    /// Attribute the order to `employee` and move it to `Processed`.
    pub(crate) fn mark_processed(&mut self, employee: &Employee) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::invariant("only pending orders can be processed"));
        }
        self.processed_by_id = Some(employee.id);
        self.processed_by = Some(employee.username.clone());
        self.status = OrderStatus::Processed;
        Ok(())
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Order ID: {}", self.order_id)?;
        writeln!(f, "Date: {}", self.order_date.to_rfc3339())?;
        writeln!(f, "Customer: {}", self.customer.name)?;
        writeln!(f, "Status: {:?}", self.status)?;
        if let (Some(name), Some(id)) = (&self.processed_by, &self.processed_by_id) {
            writeln!(f, "Processed by: {name} (ID: {id})")?;
        }
        writeln!(f, "Cart Items:")?;
        for item in &self.cart_items {
            writeln!(
                f,
                "  - {} (Price: {}, Type: {})",
                item.name(),
                item.price(),
                item.item_type()
            )?;
        }
        write!(f, "Total Amount: {}", self.total_amount)
    }
}
