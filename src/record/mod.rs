//! Records - the identity contract shared by everything a repository can hold.
//!
//! A record exposes a unique integer id, an immutable name and a mutable,
//! non-negative quantity. Variant-specific fields (brand, expiry date, ...)
//! ride along untouched by repository invariants.
//!
//! ## Example
//!
//! ```ignore
//! use keyed_store::{Record, Quantity, RecordId};
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(collection = "pallets")]
//! struct Pallet {
//!     pub id: RecordId,
//!     pub name: String,
//!     pub quantity: Quantity,
//!     pub bay: String,
//! }
//! ```

pub mod inventory;

use serde::{de::DeserializeOwned, Serialize};

/// Unique identity of a record within one repository.
pub type RecordId = i64;

/// Stock level carried by every record. Unsigned, so a stored quantity can never be negative.
pub type Quantity = u32;

/// Trait for types that can be stored in a keyed repository.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "electronics", "groceries").
    /// Used in error messages, log fields and persisted artifacts.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record. Must not change after creation.
    fn id(&self) -> RecordId;

    fn name(&self) -> &str;

    fn quantity(&self) -> Quantity;

    /// Replaces the quantity. Repositories call this only after validating the new value.
    fn set_quantity(&mut self, quantity: Quantity);
}
