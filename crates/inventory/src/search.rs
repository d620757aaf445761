use serde::{Deserialize, Serialize};

use musicshop_core::{DomainError, DomainResult, Money};

use crate::item::{CatalogItem, ItemType};

/// Inventory search options. Absent options do not filter; present ones are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the item name.
    pub keyword: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    pub item_type: Option<ItemType>,
    /// `true`: quantity > 0, `false`: quantity == 0.
    pub in_stock: Option<bool>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn min_price(mut self, min: Money) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Reject bounds that can never match.
    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::validation(format!(
                    "min price {min} is above max price {max}"
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        let keyword_ok = self
            .keyword
            .as_deref()
            .is_none_or(|kw| item.name().to_lowercase().contains(&kw.to_lowercase()));
        let min_ok = self.min_price.is_none_or(|min| item.price() >= min);
        let max_ok = self.max_price.is_none_or(|max| item.price() <= max);
        let type_ok = self.item_type.is_none_or(|t| item.item_type() == t);
        let stock_ok = self
            .in_stock
            .is_none_or(|wanted| item.is_in_stock() == wanted);

        keyword_ok && min_ok && max_ok && type_ok && stock_ok
    }
}
