//! RecordStore - Abstract keyed storage for records.

use crate::error::RepositoryError;
use crate::record::{Record, RecordId};

/// Abstract keyed storage for records of one type.
pub trait RecordStore<R: Record>: Send + Sync {
    /// Insert a new record. Fails with `DuplicateKey` if the id is already stored.
    fn insert(&self, record: R) -> Result<(), RepositoryError>;

    /// Insert a batch atomically. Fails with `DuplicateKey` for the first id that
    /// collides with a stored record or an earlier record in the batch; nothing is
    /// stored in that case.
    fn insert_all(&self, records: Vec<R>) -> Result<(), RepositoryError>;

    /// Get a copy of the record with this id. Fails with `NotFound` if absent.
    fn get(&self, id: RecordId) -> Result<R, RepositoryError>;

    /// Delete the record with this id. Fails with `NotFound` if absent.
    fn remove(&self, id: RecordId) -> Result<(), RepositoryError>;

    /// Snapshot of every record, oldest insert first.
    fn list_all(&self) -> Result<Vec<R>, RepositoryError>;

    /// Replace a record's quantity. Fails with `NotFound` if absent, then with
    /// `InvalidValue` if the quantity is negative or out of range.
    fn update_quantity(&self, id: RecordId, new_quantity: i64) -> Result<(), RepositoryError>;

    /// Add `delta` to a record's quantity in one step and return the updated record.
    fn adjust_quantity(&self, id: RecordId, delta: i64) -> Result<R, RepositoryError>;

    /// Check whether a record with this id is stored.
    fn contains(&self, id: RecordId) -> Result<bool, RepositoryError>;

    /// Find all records matching a predicate, in insertion order.
    fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, RepositoryError>;

    /// Remove all records matching a predicate and return them in insertion order.
    fn remove_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, RepositoryError>;

    /// Remove every record.
    fn clear(&self) -> Result<(), RepositoryError>;

    fn len(&self) -> Result<usize, RepositoryError>;

    fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    /// Find the first record (in insertion order) matching a predicate.
    fn find_one(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Option<R>, RepositoryError> {
        Ok(self.find(predicate)?.into_iter().next())
    }

    /// Check if any record matches a predicate.
    fn exists(&self, predicate: &dyn Fn(&R) -> bool) -> Result<bool, RepositoryError> {
        Ok(self.find_one(predicate)?.is_some())
    }

    /// Count records matching a predicate.
    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, RepositoryError> {
        Ok(self.find(predicate)?.len())
    }
}
