//! Report generation over orders and inventory.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use musicshop_core::{DocumentStore, DomainError, DomainResult, Money};
use musicshop_inventory::{CatalogItem, InventoryLedger, ItemType};
use musicshop_sales::{Order, OrderProcessor};

use crate::report::{ItemSales, SalesReport, TOP_SELLING_LIMIT};

/// Read-only view over the current orders and catalog.
#[derive(Debug, Clone, Copy)]
pub struct SalesAnalytics<'a> {
    orders: &'a [Order],
    items: &'a [CatalogItem],
}

impl<'a> SalesAnalytics<'a> {
    pub fn new(orders: &'a [Order], items: &'a [CatalogItem]) -> Self {
        Self { orders, items }
    }

    /// Borrow the live state of both services.
    pub fn over<O, I>(processor: &'a OrderProcessor<O>, ledger: &'a InventoryLedger<I>) -> Self
    where
        O: DocumentStore,
        I: DocumentStore,
    {
        Self::new(processor.orders(), ledger.items())
    }

    /// Report over orders dated within `[start, end]` (both inclusive).
    pub fn sales_report(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<SalesReport> {
        self.sales_report_at(start, end, Utc::now())
    }

    pub fn sales_report_at(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        generated_date: DateTime<Utc>,
    ) -> DomainResult<SalesReport> {
        if start > end {
            return Err(DomainError::validation("report start date is after end date"));
        }

        let in_range: Vec<&Order> = self
            .orders
            .iter()
            .filter(|order| order.order_date() >= start && order.order_date() <= end)
            .collect();

        let mut report = SalesReport::empty(generated_date);
        report.total_orders = in_range.len();
        report.total_revenue = in_range.iter().map(|order| order.total_amount()).sum();
        report.top_selling_items = top_selling(&in_range);
        report.revenue_by_category = revenue_by_category(&in_range);

        tracing::debug!(
            orders = report.total_orders,
            revenue = %report.total_revenue,
            "sales report generated"
        );
        Ok(report)
    }

    /// Number of catalog entries per item type.
    pub fn inventory_status(&self) -> BTreeMap<ItemType, usize> {
        let mut counts = BTreeMap::new();
        for item in self.items {
            *counts.entry(item.item_type()).or_insert(0) += 1;
        }
        counts
    }

    pub fn low_stock_items(&self, threshold: u32) -> Vec<&'a CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.quantity() <= threshold)
            .collect()
    }
}

/// Each cart line counts once, regardless of the item's stock quantity.
fn top_selling(orders: &[&Order]) -> Vec<ItemSales> {
    let mut ranked: Vec<ItemSales> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in orders.iter().flat_map(|order| order.cart_items()) {
        match index.get(item.name()) {
            Some(&pos) => ranked[pos].units += 1,
            None => {
                index.insert(item.name(), ranked.len());
                ranked.push(ItemSales {
                    name: item.name().to_string(),
                    units: 1,
                });
            }
        }
    }

    // Stable sort: ties stay in first-seen order.
    ranked.sort_by(|a, b| b.units.cmp(&a.units));
    ranked.truncate(TOP_SELLING_LIMIT);
    ranked
}

fn revenue_by_category(orders: &[&Order]) -> BTreeMap<ItemType, Money> {
    let mut revenue = BTreeMap::new();
    for item in orders.iter().flat_map(|order| order.cart_items()) {
        let total = revenue.entry(item.item_type()).or_insert(Money::ZERO);
        *total = *total + item.price();
    }
    revenue
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use musicshop_core::{Employee, UserId};
    use musicshop_infra::InMemoryDocumentStore;
    use musicshop_sales::Customer;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    fn album(name: &str, cents: u64) -> CatalogItem {
        CatalogItem::album(name, Money::from_cents(cents), "Various", 2000)
    }

    fn instrument(name: &str, cents: u64) -> CatalogItem {
        CatalogItem::instrument(name, Money::from_cents(cents))
    }

    fn processor_with(
        orders: Vec<(DateTime<Utc>, Vec<CatalogItem>)>,
    ) -> OrderProcessor<InMemoryDocumentStore> {
        let mut processor = OrderProcessor::open(InMemoryDocumentStore::new());
        let clerk = Employee::new(UserId::new(), "clerk");
        for (date, items) in orders {
            let mut order = processor.create_cart_at(Customer::new("C1", "Ada"), date);
            for item in items {
                processor.add_to_cart(&mut order, item).unwrap();
            }
            processor.process(order, &clerk).unwrap().into_outcome();
        }
        processor
    }

    #[test]
    fn empty_range_yields_zero_report() {
        let processor = processor_with(vec![(day(1), vec![album("Thriller", 1500)])]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report(day(10), day(20)).unwrap();
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_revenue, Money::ZERO);
        assert!(report.top_selling_items.is_empty());
        assert!(report.revenue_by_category.is_empty());
    }

    #[test]
    fn no_orders_at_all_is_not_an_error() {
        let analytics = SalesAnalytics::new(&[], &[]);
        let report = analytics.sales_report(day(1), day(2)).unwrap();
        assert_eq!(report.total_orders, 0);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let processor = processor_with(vec![
            (day(1), vec![album("A", 100)]),
            (day(5), vec![album("B", 200)]),
            (day(9), vec![album("C", 400)]),
            (day(9) + Duration::seconds(1), vec![album("D", 800)]),
        ]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report(day(1), day(9)).unwrap();
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.total_revenue, Money::from_cents(700));
    }

    #[test]
    fn top_selling_counts_cart_lines_and_keeps_first_seen_ties() {
        let processor = processor_with(vec![
            (day(2), vec![album("Bad", 1200), instrument("Capo", 900), album("Thriller", 1500)]),
            (day(3), vec![album("Thriller", 1500), instrument("Capo", 900)]),
            (day(4), vec![album("Thriller", 1500)]),
        ]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report(day(1), day(30)).unwrap();
        let ranking: Vec<(&str, u32)> = report
            .top_selling_items
            .iter()
            .map(|entry| (entry.name.as_str(), entry.units))
            .collect();
        assert_eq!(ranking, vec![("Thriller", 3), ("Capo", 2), ("Bad", 1)]);
    }

    #[test]
    fn top_selling_is_capped_at_ten() {
        let items: Vec<CatalogItem> = (0..15).map(|i| album(&format!("album-{i}"), 100)).collect();
        let processor = processor_with(vec![(day(2), items)]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report(day(1), day(3)).unwrap();
        assert_eq!(report.top_selling_items.len(), TOP_SELLING_LIMIT);
        assert_eq!(report.top_selling_items[0].name, "album-0");
        assert_eq!(report.top_selling_items[9].name, "album-9");
    }

    #[test]
    fn revenue_is_grouped_by_item_type() {
        let processor = processor_with(vec![
            (day(2), vec![album("Bad", 1200), instrument("Capo", 900)]),
            (day(3), vec![album("Thriller", 1500)]),
        ]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report(day(1), day(30)).unwrap();
        assert_eq!(report.revenue_by_category[&ItemType::Album], Money::from_cents(2700));
        assert_eq!(report.revenue_by_category[&ItemType::Instrument], Money::from_cents(900));
        assert_eq!(report.total_revenue, Money::from_cents(3600));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let analytics = SalesAnalytics::new(&[], &[]);
        let err = analytics.sales_report(day(5), day(1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn inventory_status_counts_entries_per_type() {
        let mut ledger = InventoryLedger::open(InMemoryDocumentStore::new());
        ledger.add(album("Thriller", 1500).with_quantity(5)).unwrap().into_outcome();
        ledger.add(album("Bad", 1200)).unwrap().into_outcome();
        ledger.add(instrument("Capo", 900).with_quantity(0)).unwrap().into_outcome();
        let processor = processor_with(vec![]);

        let analytics = SalesAnalytics::over(&processor, &ledger);
        let status = analytics.inventory_status();
        assert_eq!(status[&ItemType::Album], 2);
        assert_eq!(status[&ItemType::Instrument], 1);

        let low: Vec<&str> = analytics.low_stock_items(1).iter().map(|i| i.name()).collect();
        assert_eq!(low, vec!["Bad", "Capo"]);
    }

    #[test]
    fn report_serializes_categories_by_discriminator() {
        let processor = processor_with(vec![(day(2), vec![album("Bad", 1200)])]);
        let analytics = SalesAnalytics::new(processor.orders(), &[]);

        let report = analytics.sales_report_at(day(1), day(3), day(4)).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["revenueByCategory"]["album"], 12.0);
        assert_eq!(value["totalOrders"], 1);
        assert_eq!(value["generatedDate"], "2024-03-04T12:00:00Z");
    }
}
