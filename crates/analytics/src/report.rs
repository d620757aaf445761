use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use musicshop_core::Money;
use musicshop_inventory::ItemType;

/// Maximum number of entries in [`SalesReport::top_selling_items`].
pub const TOP_SELLING_LIMIT: usize = 10;

/// Cart-line count for one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    pub name: String,
    pub units: u32,
}

/// Point-in-time sales report over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub id: Uuid,
    pub generated_date: DateTime<Utc>,
    pub total_revenue: Money,
    pub total_orders: usize,
    /// Highest counts first; equal counts keep first-seen order.
    pub top_selling_items: Vec<ItemSales>,
    pub revenue_by_category: BTreeMap<ItemType, Money>,
}

impl SalesReport {
    pub fn empty(generated_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            generated_date,
            total_revenue: Money::ZERO,
            total_orders: 0,
            top_selling_items: Vec::new(),
            revenue_by_category: BTreeMap::new(),
        }
    }

    pub fn units_sold(&self, name: &str) -> Option<u32> {
        self.top_selling_items
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.units)
    }
}
