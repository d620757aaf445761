use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use musicshop_core::{DomainError, DomainResult, Money};

/// Barcode assigned to a catalog item at creation. Never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Operator-supplied barcode.
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let code = code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("barcode cannot be empty"));
        }
        Ok(Self(code.to_string()))
    }

    /// Random barcode for items that arrive without one.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Barcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type discriminator of a catalog item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Album,
    Instrument,
}

impl ItemType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemType::Album => "album",
            ItemType::Instrument => "instrument",
        }
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "album" => Ok(ItemType::Album),
            "instrument" => Ok(ItemType::Instrument),
            other => Err(DomainError::validation(format!("unknown item type '{other}'"))),
        }
    }
}

/// Variant-specific data, tagged by `"type"` in the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Album { artist: String, year: i32 },
    Instrument,
}

impl ItemKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Album { .. } => ItemType::Album,
            ItemKind::Instrument => ItemType::Instrument,
        }
    }
}

/// Sellable inventory entry.
///
/// Shared fields live here; album-only fields live in [`ItemKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    name: String,
    price: Money,
    quantity: u32,
    barcode: Barcode,
    #[serde(flatten)]
    kind: ItemKind,
}

impl CatalogItem {
    /// New album with quantity 1 and a generated barcode.
    pub fn album(name: impl Into<String>, price: Money, artist: impl Into<String>, year: i32) -> Self {
        Self::with_kind(
            name,
            price,
            ItemKind::Album {
                artist: artist.into(),
                year,
            },
        )
    }

    /// New instrument with quantity 1 and a generated barcode.
    pub fn instrument(name: impl Into<String>, price: Money) -> Self {
        Self::with_kind(name, price, ItemKind::Instrument)
    }

    fn with_kind(name: impl Into<String>, price: Money, kind: ItemKind) -> Self {
        Self {
            name: name.into().trim().to_string(),
            price,
            quantity: 1,
            barcode: Barcode::generate(),
            kind,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_barcode(mut self, barcode: Barcode) -> Self {
        self.barcode = barcode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Case-insensitive name comparison against an already-trimmed needle.
    pub(crate) fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase() == needle.to_lowercase()
    }

    pub(crate) fn validate_new(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if self.barcode.as_str().trim().is_empty() {
            return Err(DomainError::validation("barcode cannot be empty"));
        }
        Ok(())
    }

    pub(crate) fn increase_quantity(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn set_price(&mut self, price: Money) {
        self.price = price;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }
}

impl core::fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Name: {}, Price: {}, Quantity: {}",
            self.name, self.price, self.quantity
        )?;
        match &self.kind {
            ItemKind::Album { artist, year } => write!(f, ", Artist: {artist}, Year: {year}"),
            ItemKind::Instrument => write!(f, ", Type: instrument"),
        }
    }
}
