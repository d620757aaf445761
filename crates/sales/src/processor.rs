//! Order processor: owns the persisted order list.

use chrono::{DateTime, Utc};

use musicshop_core::store::{load_or_empty, write_through};
use musicshop_core::{
    Collection, Committed, DocumentStore, DomainError, DomainResult, Durability, Employee, Money,
};
use musicshop_inventory::CatalogItem;

use crate::order::{Customer, Order, OrderId};

/// Builds carts and commits processed orders.
///
/// Carts live with the caller until `process`; only processed orders are
/// held here and written to the `orders` collection.
#[derive(Debug)]
pub struct OrderProcessor<S> {
    store: S,
    orders: Vec<Order>,
}

impl<S> OrderProcessor<S>
where
    S: DocumentStore,
{
    /// Load the `orders` collection. A failed load starts with no orders.
    pub fn open(store: S) -> Self {
        let orders = load_or_empty(&store, Collection::Orders);
        Self { store, orders }
    }

    /// Fresh pending order dated now.
    pub fn create_cart(&self, customer: Customer) -> Order {
        self.create_cart_at(customer, Utc::now())
    }

    pub fn create_cart_at(&self, customer: Customer, order_date: DateTime<Utc>) -> Order {
        let order = Order::new(customer, order_date);
        tracing::debug!(order_id = %order.order_id(), customer = %order.customer().id, "cart created");
        order
    }

    /// Append `item` to the cart; returns the recomputed total.
    pub fn add_to_cart(&self, order: &mut Order, item: CatalogItem) -> DomainResult<Money> {
        order.add_item(item)
    }

    /// Attribute `order` to `employee`, mark it processed and persist the order list.
    ///
    /// The caller is responsible for `employee` being authenticated.
    pub fn process(&mut self, mut order: Order, employee: &Employee) -> DomainResult<Committed<Order>> {
        if self.find_by_id(order.order_id()).is_some() {
            return Err(DomainError::conflict(format!(
                "order {} was already processed",
                order.order_id()
            )));
        }

        order.mark_processed(employee)?;
        tracing::info!(
            order_id = %order.order_id(),
            employee = %employee.username,
            total = %order.total_amount(),
            "order processed"
        );

        self.orders.push(order.clone());
        Ok(Committed::new(order, self.persist()))
    }

    /// First order placed by `customer_id`.
    pub fn find_by_customer_id(&self, customer_id: &str) -> Option<&Order> {
        self.orders
            .iter()
            .find(|order| order.customer().id == customer_id)
    }

    pub fn find_by_id(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.order_id() == order_id)
    }

    /// Copy of every processed order.
    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Borrowed view for read-only consumers.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn flush(&self) -> Durability {
        self.persist()
    }

    fn persist(&self) -> Durability {
        write_through(&self.store, Collection::Orders, &self.orders)
    }
}
