//! Inventory ledger: the in-memory catalog and its write-through.

use musicshop_core::store::{load_or_empty, write_through};
use musicshop_core::{
    Collection, Committed, DocumentStore, DomainError, DomainResult, Durability, Money,
};

use crate::item::{Barcode, CatalogItem, ItemKind};
use crate::search::SearchCriteria;

/// What `add` did with the incoming item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// No item with that name existed; the item was inserted as-is.
    Inserted { barcode: Barcode },
    /// An item with the same name existed; its quantity was increased and the
    /// incoming item (and its barcode) discarded.
    Merged { barcode: Barcode, quantity: u32 },
}

/// Single-field edit of an existing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEdit {
    Name(String),
    /// Must be greater than zero.
    Price(Money),
    /// Must be greater than zero.
    Quantity(i64),
    /// Albums only.
    Artist(String),
    /// Albums only.
    Year(i32),
}

/// Owns the catalog for the lifetime of a session.
///
/// Items are keyed by case-insensitive name; two items with the same name
/// are treated as one stock line.
#[derive(Debug)]
pub struct InventoryLedger<S> {
    store: S,
    items: Vec<CatalogItem>,
}

impl<S> InventoryLedger<S>
where
    S: DocumentStore,
{
    /// Load the `inventory` collection. A failed load starts an empty ledger.
    pub fn open(store: S) -> Self {
        let items = load_or_empty(&store, Collection::Inventory);
        Self { store, items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive, trimmed exact name lookup. Blank input finds nothing.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.position_by_name(name).map(|idx| &self.items[idx])
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<&CatalogItem> {
        let barcode = barcode.trim();
        self.items.iter().find(|item| item.barcode().as_str() == barcode)
    }

    /// Add stock. A same-named item absorbs the new quantity instead of
    /// creating a second entry.
    pub fn add(&mut self, item: CatalogItem) -> DomainResult<Committed<AddOutcome>> {
        item.validate_new()?;

        let outcome = match self.position_by_name(item.name()) {
            Some(idx) => {
                let existing = &mut self.items[idx];
                existing.increase_quantity(item.quantity());
                tracing::info!(
                    name = existing.name(),
                    quantity = existing.quantity(),
                    "increased quantity of existing item"
                );
                AddOutcome::Merged {
                    barcode: existing.barcode().clone(),
                    quantity: existing.quantity(),
                }
            }
            None => {
                tracing::info!(name = item.name(), barcode = %item.barcode(), "added new item");
                let barcode = item.barcode().clone();
                self.items.push(item);
                AddOutcome::Inserted { barcode }
            }
        };

        Ok(Committed::new(outcome, self.persist()))
    }

    /// Remove every item whose name matches; if none does, fall back to an
    /// exact barcode match. Removing nothing is not an error.
    pub fn remove(&mut self, name_or_barcode: &str) -> Committed<Vec<CatalogItem>> {
        let needle = name_or_barcode.trim();
        let mut removed = Vec::new();

        if !needle.is_empty() {
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
                .into_iter()
                .partition(|item| item.name_matches(needle));
            self.items = kept;
            removed = gone;

            if removed.is_empty() {
                let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
                    .into_iter()
                    .partition(|item| item.barcode().as_str() == needle);
                self.items = kept;
                removed = gone;
            }
        }

        if removed.is_empty() {
            tracing::debug!(needle, "remove matched nothing");
        } else {
            tracing::info!(needle, count = removed.len(), "removed items");
        }

        Committed::new(removed, self.persist())
    }

    /// Overwrite an item's quantity. Zero or negative quantities are rejected.
    pub fn edit_quantity(&mut self, name: &str, new_quantity: i64) -> DomainResult<Committed<u32>> {
        self.edit_item(name, ItemEdit::Quantity(new_quantity))
            .map(|committed| committed.map(|item| item.quantity()))
    }

    /// Apply one edit to the item named `name` and persist.
    pub fn edit_item(&mut self, name: &str, edit: ItemEdit) -> DomainResult<Committed<CatalogItem>> {
        let idx = self
            .position_by_name(name)
            .ok_or_else(|| DomainError::not_found(format!("item '{}'", name.trim())))?;

        if let Err(err) = apply_edit(&mut self.items[idx], edit) {
            tracing::warn!(name, error = %err, "item edit rejected");
            return Err(err);
        }

        let updated = self.items[idx].clone();
        tracing::info!(name = updated.name(), "item updated");
        Ok(Committed::new(updated, self.persist()))
    }

    /// Items matching every present criterion. Does not mutate the ledger.
    pub fn search(&self, criteria: &SearchCriteria) -> DomainResult<Vec<CatalogItem>> {
        criteria.validate()?;
        Ok(self
            .items
            .iter()
            .filter(|item| criteria.matches(item))
            .cloned()
            .collect())
    }

    /// Items with quantity at or below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.quantity() <= threshold)
            .collect()
    }

    /// Drop the whole catalog.
    pub fn clear(&mut self) -> Committed<usize> {
        let count = self.items.len();
        self.items.clear();
        tracing::info!(count, "inventory cleared");
        Committed::new(count, self.persist())
    }

    /// Rewrite the persisted snapshot from the in-memory list.
    pub fn flush(&self) -> Durability {
        self.persist()
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        if needle.is_empty() {
            return None;
        }
        self.items.iter().position(|item| item.name_matches(needle))
    }

    fn persist(&self) -> Durability {
        write_through(&self.store, Collection::Inventory, &self.items)
    }
}

fn apply_edit(item: &mut CatalogItem, edit: ItemEdit) -> DomainResult<()> {
    match edit {
        ItemEdit::Name(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::validation("item name cannot be empty"));
            }
            item.set_name(name.to_string());
        }
        ItemEdit::Price(price) => {
            if price.is_zero() {
                return Err(DomainError::validation("price must be greater than zero"));
            }
            item.set_price(price);
        }
        ItemEdit::Quantity(quantity) => {
            if quantity <= 0 {
                return Err(DomainError::validation("quantity must be greater than zero"));
            }
            let quantity = u32::try_from(quantity)
                .map_err(|_| DomainError::validation("quantity is too large"))?;
            item.set_quantity(quantity);
        }
        ItemEdit::Artist(new_artist) => match item.kind_mut() {
            ItemKind::Album { artist, .. } => *artist = new_artist,
            ItemKind::Instrument => {
                return Err(DomainError::validation("only albums have an artist"));
            }
        },
        ItemEdit::Year(new_year) => match item.kind_mut() {
            ItemKind::Album { year, .. } => *year = new_year,
            ItemKind::Instrument => {
                return Err(DomainError::validation("only albums have a release year"));
            }
        },
    }
    Ok(())
}
