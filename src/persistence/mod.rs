//! Persistence - round-trip record sequences through a single text artifact.
//!
//! `deserialize(serialize(records))` reproduces the same records in the same
//! order. A missing artifact loads as an empty sequence; malformed content is
//! a [`PersistenceError::Decode`](crate::PersistenceError::Decode).

mod codec;
mod file;
mod file_backed;

pub use codec::{deserialize, serialize, Codec};
pub use file::{load_from_file, save_to_file};
pub use file_backed::FileBackedRepository;
