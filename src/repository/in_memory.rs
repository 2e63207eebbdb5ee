//! InMemoryRepository - HashMap-backed keyed repository.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::RecordStore;
use crate::error::RepositoryError;
use crate::record::{Quantity, RecordId};
use crate::Record;

/// Internal stored representation of a record.
struct Slot<R> {
    seq: u64,
    record: R,
}

struct Storage<R> {
    records: HashMap<RecordId, Slot<R>>,
    /// Insertion sequence -> id. Iterating this map yields insertion order.
    order: BTreeMap<u64, RecordId>,
    next_seq: u64,
}

impl<R: Record> Storage<R> {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, record: R) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, record.id());
        self.records.insert(record.id(), Slot { seq, record });
    }

    fn take(&mut self, id: RecordId) -> Option<R> {
        let slot = self.records.remove(&id)?;
        self.order.remove(&slot.seq);
        Some(slot.record)
    }

    fn ordered(&self) -> impl Iterator<Item = &R> + '_ {
        self.order
            .values()
            .filter_map(move |id| self.records.get(id).map(|slot| &slot.record))
    }

    /// First id in `records` that is already stored or repeats an earlier one.
    fn first_collision(&self, records: &[R]) -> Option<RecordId> {
        let mut seen = HashSet::with_capacity(records.len());
        records
            .iter()
            .map(Record::id)
            .find(|id| self.records.contains_key(id) || !seen.insert(*id))
    }
}

/// In-memory repository backed by a HashMap plus an insertion-order index.
///
/// Every operation runs under one lock acquisition, so concurrent callers see
/// serializable effects. Clone-friendly via Arc: clones share storage.
pub struct InMemoryRepository<R> {
    storage: Arc<RwLock<Storage<R>>>,
}

impl<R> Clone for InMemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<R: Record> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryRepository<R> {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Storage::new())),
        }
    }

    /// Create a repository holding `records` in the given order.
    pub fn from_records(records: Vec<R>) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        repo.insert_all(records)?;
        Ok(repo)
    }

    /// Replace the whole contents with `records`, keeping their order.
    ///
    /// Fails with `DuplicateKey` if `records` repeats an id; the current
    /// contents are kept in that case.
    pub fn replace_all(&self, records: Vec<R>) -> Result<(), RepositoryError> {
        let mut fresh = Storage::<R>::new();
        if let Some(id) = fresh.first_collision(&records) {
            return Err(rejected::<R>("replace_all", duplicate::<R>(id)));
        }
        let count = records.len();
        for record in records {
            fresh.push(record);
        }

        *self.write("replace_all")? = fresh;
        debug!(collection = R::COLLECTION, count, "repository contents replaced");
        Ok(())
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, Storage<R>>, RepositoryError> {
        self.storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned(operation))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Storage<R>>, RepositoryError> {
        self.storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned(operation))
    }
}

impl<R: Record> RecordStore<R> for InMemoryRepository<R> {
    fn insert(&self, record: R) -> Result<(), RepositoryError> {
        let id = record.id();
        let mut storage = self.write("insert")?;

        if storage.records.contains_key(&id) {
            return Err(rejected::<R>("insert", duplicate::<R>(id)));
        }

        storage.push(record);
        debug!(collection = R::COLLECTION, id, "record inserted");
        Ok(())
    }

    fn insert_all(&self, records: Vec<R>) -> Result<(), RepositoryError> {
        let mut storage = self.write("insert_all")?;

        if let Some(id) = storage.first_collision(&records) {
            return Err(rejected::<R>("insert_all", duplicate::<R>(id)));
        }

        let count = records.len();
        for record in records {
            storage.push(record);
        }
        debug!(collection = R::COLLECTION, count, "records inserted");
        Ok(())
    }

    fn get(&self, id: RecordId) -> Result<R, RepositoryError> {
        let storage = self.read("get")?;
        storage
            .records
            .get(&id)
            .map(|slot| slot.record.clone())
            .ok_or_else(|| rejected::<R>("get", not_found::<R>(id)))
    }

    fn remove(&self, id: RecordId) -> Result<(), RepositoryError> {
        let mut storage = self.write("remove")?;
        match storage.take(id) {
            Some(_) => {
                debug!(collection = R::COLLECTION, id, "record removed");
                Ok(())
            }
            None => Err(rejected::<R>("remove", not_found::<R>(id))),
        }
    }

    fn list_all(&self) -> Result<Vec<R>, RepositoryError> {
        let storage = self.read("list_all")?;
        let records = storage.ordered().cloned().collect();
        Ok(records)
    }

    fn update_quantity(&self, id: RecordId, new_quantity: i64) -> Result<(), RepositoryError> {
        let mut storage = self.write("update_quantity")?;
        let slot = storage
            .records
            .get_mut(&id)
            .ok_or_else(|| rejected::<R>("update_quantity", not_found::<R>(id)))?;

        let quantity = validate_quantity::<R>(id, new_quantity)
            .map_err(|err| rejected::<R>("update_quantity", err))?;

        slot.record.set_quantity(quantity);
        debug!(collection = R::COLLECTION, id, quantity, "quantity updated");
        Ok(())
    }

    fn adjust_quantity(&self, id: RecordId, delta: i64) -> Result<R, RepositoryError> {
        let mut storage = self.write("adjust_quantity")?;
        let slot = storage
            .records
            .get_mut(&id)
            .ok_or_else(|| rejected::<R>("adjust_quantity", not_found::<R>(id)))?;

        let attempted = i64::from(slot.record.quantity()).saturating_add(delta);
        let quantity = validate_quantity::<R>(id, attempted)
            .map_err(|err| rejected::<R>("adjust_quantity", err))?;

        slot.record.set_quantity(quantity);
        debug!(collection = R::COLLECTION, id, delta, quantity, "quantity adjusted");
        Ok(slot.record.clone())
    }

    fn contains(&self, id: RecordId) -> Result<bool, RepositoryError> {
        let storage = self.read("contains")?;
        let found = storage.records.contains_key(&id);
        Ok(found)
    }

    fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, RepositoryError> {
        let storage = self.read("find")?;
        let matches = storage
            .ordered()
            .filter(|record| predicate(record))
            .cloned()
            .collect();
        Ok(matches)
    }

    fn find_one(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Option<R>, RepositoryError> {
        let storage = self.read("find_one")?;
        let found = storage.ordered().find(|record| predicate(record)).cloned();
        Ok(found)
    }

    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, RepositoryError> {
        let storage = self.read("count")?;
        let count = storage.ordered().filter(|record| predicate(record)).count();
        Ok(count)
    }

    fn remove_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, RepositoryError> {
        let mut storage = self.write("remove_where")?;
        let ids: Vec<RecordId> = storage
            .ordered()
            .filter(|record| predicate(record))
            .map(Record::id)
            .collect();

        let removed: Vec<R> = ids.into_iter().filter_map(|id| storage.take(id)).collect();
        debug!(collection = R::COLLECTION, count = removed.len(), "records removed");
        Ok(removed)
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        let mut storage = self.write("clear")?;
        let count = storage.records.len();
        *storage = Storage::new();
        debug!(collection = R::COLLECTION, count, "repository cleared");
        Ok(())
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.read("len")?.records.len())
    }
}

fn validate_quantity<R: Record>(id: RecordId, attempted: i64) -> Result<Quantity, RepositoryError> {
    Quantity::try_from(attempted).map_err(|_| RepositoryError::InvalidValue {
        collection: R::COLLECTION,
        id,
        attempted,
    })
}

fn duplicate<R: Record>(id: RecordId) -> RepositoryError {
    RepositoryError::DuplicateKey {
        collection: R::COLLECTION,
        id,
    }
}

fn not_found<R: Record>(id: RecordId) -> RepositoryError {
    RepositoryError::NotFound {
        collection: R::COLLECTION,
        id,
    }
}

fn rejected<R: Record>(operation: &'static str, err: RepositoryError) -> RepositoryError {
    debug!(collection = R::COLLECTION, operation, error = %err, "operation rejected");
    err
}
