//! Repositories - keyed storage for records.
//!
//! A repository owns the authoritative mapping from [`RecordId`] to record
//! and enforces the store invariants:
//!
//! - ids are unique; a duplicate insert never overwrites (first writer wins),
//! - stored quantities are never negative,
//! - listing returns records in insertion order.
//!
//! Failed operations leave the repository untouched. Everything handed back
//! to the caller is an owned snapshot.
//!
//! ## Example
//!
//! ```ignore
//! use keyed_store::{GroceryItem, InMemoryRepository, RecordStore, RepositoryError};
//!
//! let groceries = InMemoryRepository::<GroceryItem>::new();
//! groceries.insert(milk)?;
//!
//! match groceries.update_quantity(102, -10) {
//!     Err(RepositoryError::InvalidValue { attempted, .. }) => eprintln!("rejected {attempted}"),
//!     other => other?,
//! }
//! ```
//!
//! [`RecordId`]: crate::RecordId

mod in_memory;
mod store;

pub use in_memory::InMemoryRepository;
pub use store::RecordStore;
