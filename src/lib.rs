// Lets `#[derive(Record)]` expand to `keyed_store::...` paths inside this crate too.
extern crate self as keyed_store;

mod config;
mod error;
mod persistence;
mod record;
mod repository;

pub use config::PersistenceConfig;
pub use error::{ErrorKind, PersistenceError, RepositoryError};
pub use persistence::{
    deserialize, load_from_file, save_to_file, serialize, Codec, FileBackedRepository,
};
pub use record::inventory::{ElectronicItem, GroceryItem, StockItem};
pub use record::{Quantity, Record, RecordId};
pub use repository::{InMemoryRepository, RecordStore};

// Re-export the derive macro alongside the trait it implements
pub use keyed_store_macros::Record;
