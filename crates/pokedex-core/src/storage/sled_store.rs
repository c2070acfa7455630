//! Sled-backed record store.

use sled::transaction::{ConflictableTransactionError, Transactional, TransactionalTree};
use sled::{Db, Tree};
use tracing::debug;

use super::key::{self, decode_id, encode_no};
use super::{Document, EntryFilter, Record, RecordStore, StoreConfig};
use crate::dto::{EntryPatch, NewEntry};
use crate::entry::EntryId;
use crate::error::StoreError;

/// Tree name for entry records (entry_id -> record).
const ENTRIES_TREE: &str = "entries";

/// Tree name for the unique catalog number index (no -> entry_id).
const NO_INDEX_TREE: &str = "index:no";

/// Tree name for the name index (name + entry_id -> empty).
const NAME_INDEX_TREE: &str = "index:name";

type TxResult<T> = Result<T, ConflictableTransactionError<StoreError>>;

/// Record store wrapping a sled database.
///
/// Every write touches the entries tree and both index trees inside a single
/// sled transaction, so the number index can be used to reject duplicates
/// without a separate lock.
pub struct SledStore {
    db: Db,
    entries: Tree,
    by_no: Tree,
    by_name: Tree,
}

impl SledStore {
    /// Open or create a store with the given configuration.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let db = config.to_sled_config().open()?;
        let entries = db.open_tree(ENTRIES_TREE)?;
        let by_no = db.open_tree(NO_INDEX_TREE)?;
        let by_name = db.open_tree(NAME_INDEX_TREE)?;

        Ok(Self {
            db,
            entries,
            by_no,
            by_name,
        })
    }

    /// Open a temporary store, deleted on drop.
    pub fn temporary() -> Result<Self, StoreError> {
        Self::open(StoreConfig::temporary())
    }

    /// Check if the database was recovered from a previous crash.
    pub fn was_recovered(&self) -> bool {
        self.db.was_recovered()
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    fn load(&self, id: &EntryId) -> Result<Option<Document>, StoreError> {
        match self.entries.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(Document::new(*id, Record::from_bytes(&bytes)?))),
            None => Ok(None),
        }
    }
}

fn abort<T>(err: StoreError) -> TxResult<T> {
    Err(ConflictableTransactionError::Abort(err))
}

fn decode_tx(bytes: &[u8]) -> TxResult<Record> {
    Record::from_bytes(bytes).map_err(ConflictableTransactionError::Abort)
}

fn encode_tx(record: &Record) -> TxResult<Vec<u8>> {
    record.to_bytes().map_err(ConflictableTransactionError::Abort)
}

fn insert_tx(
    entries: &TransactionalTree,
    by_no: &TransactionalTree,
    by_name: &TransactionalTree,
    entry: &NewEntry,
) -> TxResult<Document> {
    let no_key = encode_no(entry.no);
    if by_no.get(no_key)?.is_some() {
        return abort(StoreError::Duplicate { no: entry.no });
    }

    let id = EntryId::generate();
    let record = Record::new(entry.no, entry.name.clone());
    let bytes = encode_tx(&record)?;

    entries.insert(&id.as_bytes()[..], bytes)?;
    by_no.insert(&no_key[..], &id.as_bytes()[..])?;
    by_name.insert(key::name_key(&record.name, &id), &[] as &[u8])?;

    Ok(Document::new(id, record))
}

impl RecordStore for SledStore {
    fn create(&self, entry: NewEntry) -> Result<Document, StoreError> {
        let doc = (&self.entries, &self.by_no, &self.by_name)
            .transaction(|(entries, by_no, by_name)| insert_tx(entries, by_no, by_name, &entry))?;

        debug!(id = %doc.id, no = doc.record.no, "inserted entry");
        Ok(doc)
    }

    fn find_one(&self, filter: &EntryFilter) -> Result<Option<Document>, StoreError> {
        match filter {
            EntryFilter::No(no) => match self.by_no.get(encode_no(*no))? {
                Some(id_bytes) => {
                    let id = decode_id(&id_bytes).ok_or(StoreError::InvalidKey)?;
                    self.load(&id)
                }
                None => Ok(None),
            },
            EntryFilter::Name(name) => {
                let prefix = key::name_prefix(name);
                for item in self.by_name.scan_prefix(&prefix) {
                    let (index_key, _) = item?;
                    let Some(id) = key::id_from_name_key(&prefix, &index_key) else {
                        continue;
                    };
                    if let Some(doc) = self.load(&id)? {
                        return Ok(Some(doc));
                    }
                }
                Ok(None)
            }
        }
    }

    fn find_by_id(&self, id: &EntryId) -> Result<Option<Document>, StoreError> {
        self.load(id)
    }

    fn find(&self, skip: usize, limit: usize) -> Result<Vec<Document>, StoreError> {
        self.by_no
            .iter()
            .skip(skip)
            .take(limit)
            .filter_map(|item| {
                let id = match item {
                    Ok((_, id_bytes)) => decode_id(&id_bytes).ok_or(StoreError::InvalidKey),
                    Err(err) => Err(err.into()),
                };
                // Entries removed since the index was read are skipped.
                id.and_then(|id| self.load(&id)).transpose()
            })
            .collect()
    }

    fn update_one(&self, id: &EntryId, patch: &EntryPatch) -> Result<u64, StoreError> {
        let id_key = &id.as_bytes()[..];

        let matched = (&self.entries, &self.by_no, &self.by_name).transaction(
            |(entries, by_no, by_name)| {
                let Some(bytes) = entries.get(id_key)? else {
                    return Ok(0);
                };
                let mut record = decode_tx(&bytes)?;

                if let Some(no) = patch.no.filter(|no| *no != record.no) {
                    let no_key = encode_no(no);
                    if by_no.get(no_key)?.is_some() {
                        return abort(StoreError::Duplicate { no });
                    }
                    by_no.remove(&encode_no(record.no)[..])?;
                    by_no.insert(&no_key[..], id_key)?;
                    record.no = no;
                }

                if let Some(name) = patch.name.as_ref().filter(|name| **name != record.name) {
                    by_name.remove(key::name_key(&record.name, id))?;
                    by_name.insert(key::name_key(name, id), &[] as &[u8])?;
                    record.name = name.clone();
                }

                record.version += 1;
                entries.insert(id_key, encode_tx(&record)?)?;
                Ok(1)
            },
        )?;

        debug!(%id, matched, "updated entry");
        Ok(matched)
    }

    fn delete_one(&self, id: &EntryId) -> Result<u64, StoreError> {
        let id_key = &id.as_bytes()[..];

        let deleted = (&self.entries, &self.by_no, &self.by_name).transaction(
            |(entries, by_no, by_name)| {
                let Some(bytes) = entries.remove(id_key)? else {
                    return Ok(0);
                };
                let record = decode_tx(&bytes)?;
                by_no.remove(&encode_no(record.no)[..])?;
                by_name.remove(key::name_key(&record.name, id))?;
                Ok(1)
            },
        )?;

        debug!(%id, deleted, "deleted entry");
        Ok(deleted)
    }

    fn delete_many(&self) -> Result<u64, StoreError> {
        let count = self.entries.len() as u64;

        // Indexes first: a partial clear leaves unindexed records, never dangling index keys.
        self.by_no.clear()?;
        self.by_name.clear()?;
        self.entries.clear()?;

        debug!(count, "cleared all entries");
        Ok(count)
    }

    fn insert_many(&self, entries: Vec<NewEntry>) -> Result<Vec<Document>, StoreError> {
        let docs = (&self.entries, &self.by_no, &self.by_name).transaction(
            |(entries_tree, by_no, by_name)| {
                entries
                    .iter()
                    .map(|entry| insert_tx(entries_tree, by_no, by_name, entry))
                    .collect::<TxResult<Vec<_>>>()
            },
        )?;

        debug!(count = docs.len(), "bulk inserted entries");
        Ok(docs)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.len())
    }
}
