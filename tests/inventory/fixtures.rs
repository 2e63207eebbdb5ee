//! Sample warehouse stock.

use chrono::{Duration, NaiveDate};
use keyed_store::{ElectronicItem, GroceryItem, InMemoryRepository, RecordStore};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

pub fn electronics() -> InMemoryRepository<ElectronicItem> {
    let repo = InMemoryRepository::<ElectronicItem>::new();
    repo.insert(ElectronicItem::new(1, "Laptop", 50, "Dell", 12))
        .unwrap();
    repo.insert(ElectronicItem::new(2, "Smartphone", 120, "Samsung", 24))
        .unwrap();
    repo
}

pub fn groceries() -> InMemoryRepository<GroceryItem> {
    let repo = InMemoryRepository::<GroceryItem>::new();
    repo.insert(GroceryItem::new(101, "Milk", 200, today() + Duration::days(7)))
        .unwrap();
    repo.insert(GroceryItem::new(102, "Bread", 150, today() + Duration::days(3)))
        .unwrap();
    repo
}
