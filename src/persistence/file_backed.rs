//! FileBackedRepository - in-memory repository mirrored to one text artifact.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use super::file::{load_from_file, save_to_file};
use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, RepositoryError};
use crate::record::RecordId;
use crate::repository::{InMemoryRepository, RecordStore};
use crate::Record;

/// Repository whose contents are loaded from and saved to a file.
///
/// Reads go through [`FileBackedRepository::repository`]. Mutations are
/// mirrored here so that, with `autosave` on, each successful call rewrites the
/// artifact. A call that fails leaves both the file and the in-memory contents
/// as they were, including when the autosave write itself fails.
pub struct FileBackedRepository<R> {
    repo: InMemoryRepository<R>,
    config: PersistenceConfig,
    save_lock: Arc<Mutex<()>>,
}

impl<R> Clone for FileBackedRepository<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            save_lock: Arc::clone(&self.save_lock),
        }
    }
}

impl<R: Record> FileBackedRepository<R> {
    /// Open the artifact named by `config`. A missing file opens an empty repository.
    pub fn open(config: PersistenceConfig) -> Result<Self, PersistenceError> {
        let records = load_from_file(&config.path, config.codec)?;
        let repo = InMemoryRepository::from_records(records)?;
        Ok(Self {
            repo,
            config,
            save_lock: Arc::new(Mutex::new(())),
        })
    }

    /// The underlying repository, for reads and for callers that manage saving themselves.
    pub fn repository(&self) -> &InMemoryRepository<R> {
        &self.repo
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Write the current snapshot to the artifact.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let _guard = self.lock_saves()?;
        self.write_snapshot()
    }

    /// Replace the in-memory contents with what is on disk.
    pub fn reload(&self) -> Result<(), PersistenceError> {
        let records = load_from_file(&self.config.path, self.config.codec)?;
        self.repo.replace_all(records)?;
        Ok(())
    }

    pub fn insert(&self, record: R) -> Result<(), PersistenceError> {
        self.mutate("insert", |repo| repo.insert(record))
    }

    pub fn insert_all(&self, records: Vec<R>) -> Result<(), PersistenceError> {
        self.mutate("insert_all", |repo| repo.insert_all(records))
    }

    pub fn remove(&self, id: RecordId) -> Result<(), PersistenceError> {
        self.mutate("remove", |repo| repo.remove(id))
    }

    pub fn remove_where(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<R>, PersistenceError> {
        if !self.config.autosave {
            return Ok(self.repo.remove_where(predicate)?);
        }
        let _guard = self.lock_saves()?;
        let previous = self.repo.list_all()?;
        let removed = self.repo.remove_where(predicate)?;
        if !removed.is_empty() {
            self.save_or_restore("remove_where", previous)?;
        }
        Ok(removed)
    }

    pub fn update_quantity(&self, id: RecordId, new_quantity: i64) -> Result<(), PersistenceError> {
        self.mutate("update_quantity", |repo| repo.update_quantity(id, new_quantity))
    }

    pub fn adjust_quantity(&self, id: RecordId, delta: i64) -> Result<R, PersistenceError> {
        self.mutate("adjust_quantity", |repo| repo.adjust_quantity(id, delta))
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.mutate("clear", |repo| repo.clear())
    }

    /// Run `apply` and, with autosave on, write the result out. If the write
    /// fails the repository is restored to its contents before `apply`.
    fn mutate<T>(
        &self,
        op: &'static str,
        apply: impl FnOnce(&InMemoryRepository<R>) -> Result<T, RepositoryError>,
    ) -> Result<T, PersistenceError> {
        if !self.config.autosave {
            return Ok(apply(&self.repo)?);
        }
        let _guard = self.lock_saves()?;
        let previous = self.repo.list_all()?;
        let value = apply(&self.repo)?;
        self.save_or_restore(op, previous)?;
        Ok(value)
    }

    fn save_or_restore(&self, op: &'static str, previous: Vec<R>) -> Result<(), PersistenceError> {
        debug!(collection = R::COLLECTION, op, "autosave");
        if let Err(err) = self.write_snapshot() {
            warn!(
                collection = R::COLLECTION,
                op,
                error = %err,
                "autosave failed, restoring previous contents"
            );
            self.repo.replace_all(previous)?;
            return Err(err);
        }
        Ok(())
    }

    fn lock_saves(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.save_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("save"))
    }

    fn write_snapshot(&self) -> Result<(), PersistenceError> {
        let records = self.repo.list_all()?;
        save_to_file(&self.config.path, &records, self.config.codec)
    }
}
