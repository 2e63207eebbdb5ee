//! Inventory record variants.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Quantity, RecordId};
use crate::Record;

/// A piece of electronics tracked by brand and warranty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "electronics")]
pub struct ElectronicItem {
    pub id: RecordId,
    pub name: String,
    pub quantity: Quantity,
    pub brand: String,
    pub warranty_months: u32,
}

impl ElectronicItem {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        quantity: Quantity,
        brand: impl Into<String>,
        warranty_months: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            brand: brand.into(),
            warranty_months,
        }
    }
}

impl fmt::Display for ElectronicItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Electronic] Id: {}, Name: {}, Brand: {}, Qty: {}, Warranty: {} months",
            self.id, self.name, self.brand, self.quantity, self.warranty_months
        )
    }
}

/// A perishable grocery item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "groceries")]
pub struct GroceryItem {
    pub id: RecordId,
    pub name: String,
    pub quantity: Quantity,
    pub expiry_date: NaiveDate,
}

impl GroceryItem {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        quantity: Quantity,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            expiry_date,
        }
    }

    /// True once `today` is past the expiry date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.expiry_date
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Grocery] Id: {}, Name: {}, Qty: {}, Expires: {}",
            self.id, self.name, self.quantity, self.expiry_date
        )
    }
}

/// General stock entry stamped with the moment it entered the inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "stock_items")]
pub struct StockItem {
    pub id: RecordId,
    pub name: String,
    pub quantity: Quantity,
    pub date_added: DateTime<Utc>,
}

impl StockItem {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        quantity: Quantity,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            date_added,
        }
    }
}

impl fmt::Display for StockItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, Name: {}, Qty: {}, Added: {}",
            self.id,
            self.name,
            self.quantity,
            self.date_added.format("%Y-%m-%d")
        )
    }
}
