//! Catalog service: create, list, lookup, update, and delete entries.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::CatalogConfig;
use crate::dto::{EntryPatch, NewEntry, Pagination};
use crate::entry::{Entry, EntryId};
use crate::error::{CatalogError, StoreError};
use crate::storage::{Document, EntryFilter, RecordStore};

/// Catalog operations over an injected record store.
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
    default_limit: usize,
}

impl CatalogService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn RecordStore>, config: &CatalogConfig) -> Self {
        Self {
            store,
            default_limit: config.default_limit,
        }
    }

    /// Create an entry. The name is stored lowercase.
    pub fn create(&self, mut input: NewEntry) -> Result<Entry, CatalogError> {
        input.validate()?;
        input.name = input.name.to_lowercase();

        let doc = self
            .store
            .create(input)
            .map_err(|err| handle_store_error(err, "create"))?;

        info!(id = %doc.id, no = doc.record.no, "created entry");
        Ok(doc.into())
    }

    /// List entries ordered by `no`.
    pub fn list(&self, pagination: &Pagination) -> Result<Vec<Entry>, CatalogError> {
        pagination.validate()?;
        let limit = pagination.limit.unwrap_or(self.default_limit);
        let offset = pagination.offset.unwrap_or(0);

        let docs = self
            .store
            .find(offset, limit)
            .map_err(|err| handle_store_error(err, "list"))?;

        Ok(docs.into_iter().map(Entry::from).collect())
    }

    /// Resolve a single entry by number, then id, then name.
    ///
    /// The name is matched exactly; stored names are lowercase, so a
    /// mixed-case term only matches by number or id.
    pub fn find_one(&self, term: &str) -> Result<Entry, CatalogError> {
        self.resolve(term).map(Entry::from)
    }

    /// Apply `patch` to the entry resolved from `term`.
    ///
    /// Returns the resolved entry overlaid with the patch fields.
    pub fn update(&self, term: &str, mut patch: EntryPatch) -> Result<Entry, CatalogError> {
        patch.validate()?;
        let doc = self.resolve(term)?;

        if let Some(name) = patch.name.as_mut() {
            *name = name.to_lowercase();
        }

        let matched = self
            .store
            .update_one(&doc.id, &patch)
            .map_err(|err| handle_store_error(err, "update"))?;
        if matched == 0 {
            // Deleted between resolution and write.
            return Err(CatalogError::NotFound {
                term: term.to_string(),
            });
        }

        info!(id = %doc.id, "updated entry");
        Ok(Entry::from(doc).merged(&patch))
    }

    /// Delete an entry by id.
    pub fn remove(&self, id: &EntryId) -> Result<(), CatalogError> {
        let deleted = self
            .store
            .delete_one(id)
            .map_err(|err| handle_store_error(err, "remove"))?;

        if deleted == 0 {
            return Err(CatalogError::InvalidRequest { id: id.to_string() });
        }

        info!(%id, "removed entry");
        Ok(())
    }

    /// Number of stored entries.
    pub fn count(&self) -> Result<usize, CatalogError> {
        self.store
            .count()
            .map_err(|err| handle_store_error(err, "count"))
    }

    fn resolve(&self, term: &str) -> Result<Document, CatalogError> {
        self.lookup(term)
            .map_err(|err| handle_store_error(err, "find"))?
            .ok_or_else(|| CatalogError::NotFound {
                term: term.to_string(),
            })
    }

    fn lookup(&self, term: &str) -> Result<Option<Document>, StoreError> {
        if let Some(no) = numeric_term(term) {
            if let Some(doc) = self.store.find_one(&EntryFilter::No(no))? {
                return Ok(Some(doc));
            }
        }

        if let Some(id) = EntryId::parse(term) {
            if let Some(doc) = self.store.find_by_id(&id)? {
                return Ok(Some(doc));
            }
        }

        self.store.find_one(&EntryFilter::Name(term.to_string()))
    }
}

/// Catalog number named by `term`, if it reads as a whole number in range.
///
/// Any numeric spelling counts (`"25"`, `"25.0"`, `"2.5e1"`, `" 25 "`);
/// fractions, zero, and out-of-range values skip the number lookup.
fn numeric_term(term: &str) -> Option<u32> {
    let value = term.trim().parse::<f64>().ok()?;
    let whole = value.is_finite() && value.fract() == 0.0;
    (whole && value >= 1.0 && value <= f64::from(u32::MAX)).then_some(value as u32)
}

/// Map a store failure to the caller-facing error.
///
/// Only uniqueness violations keep their detail; everything else is logged
/// and masked.
fn handle_store_error(err: StoreError, action: &'static str) -> CatalogError {
    match err {
        StoreError::Duplicate { no } => CatalogError::DuplicateEntry { no },
        other => {
            error!(action, error = %other, "store operation failed");
            CatalogError::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SledStore;

    fn service() -> CatalogService {
        let store = Arc::new(SledStore::temporary().unwrap());
        CatalogService::new(store, &CatalogConfig::default().with_default_limit(3))
    }

    #[test]
    fn test_create_lowercases_name() {
        let service = service();
        let entry = service.create(NewEntry::new(25, "Pikachu")).unwrap();
        assert_eq!(entry.name, "pikachu");
        assert_eq!(entry.no, 25);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let service = service();
        let err = service.create(NewEntry::new(0, "missingno")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_list_uses_default_limit() {
        let service = service();
        for no in 1..=5 {
            service.create(NewEntry::new(no, format!("mon{}", no))).unwrap();
        }

        let page = service.list(&Pagination::default()).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].no, 1);
    }

    #[test]
    fn test_numeric_lookup_precedes_name() {
        let service = service();
        // An entry whose name looks like another entry's number.
        service.create(NewEntry::new(2, "1")).unwrap();
        let first = service.create(NewEntry::new(1, "bulbasaur")).unwrap();

        assert_eq!(service.find_one("1").unwrap(), first);
    }

    #[test]
    fn test_numeric_miss_falls_back_to_name() {
        let service = service();
        let entry = service.create(NewEntry::new(2, "151")).unwrap();

        assert_eq!(service.find_one("151").unwrap(), entry);
    }

    #[test]
    fn test_numeric_spellings_resolve_by_number() {
        let service = service();
        let pikachu = service.create(NewEntry::new(25, "pikachu")).unwrap();
        let caterpie = service.create(NewEntry::new(10, "caterpie")).unwrap();
        service.create(NewEntry::new(2, "ivysaur")).unwrap();

        for term in ["25", "+25", "025", "25.0", " 25 ", "2.5e1"] {
            assert_eq!(service.find_one(term).unwrap(), pikachu, "term: {:?}", term);
        }
        assert_eq!(service.find_one("1e1").unwrap(), caterpie);

        let err = service.find_one("2.5").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { term } if term == "2.5"));
    }

    #[test]
    fn test_numeric_term_bounds() {
        assert_eq!(numeric_term("1"), Some(1));
        assert_eq!(numeric_term("4294967295"), Some(u32::MAX));
        assert_eq!(numeric_term("4294967296"), None);
        assert_eq!(numeric_term("0"), None);
        assert_eq!(numeric_term("-3"), None);
        assert_eq!(numeric_term("inf"), None);
        assert_eq!(numeric_term("NaN"), None);
        assert_eq!(numeric_term("pikachu"), None);
    }

    #[test]
    fn test_lookup_by_id() {
        let service = service();
        let entry = service.create(NewEntry::new(133, "eevee")).unwrap();

        assert_eq!(service.find_one(&entry.id.to_string()).unwrap(), entry);
    }

    #[test]
    fn test_lookup_by_name_is_case_sensitive() {
        let service = service();
        service.create(NewEntry::new(133, "Eevee")).unwrap();

        assert!(service.find_one("eevee").is_ok());
        let err = service.find_one("Eevee").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { term } if term == "Eevee"));
    }

    #[test]
    fn test_update_renumber_conflict() {
        let service = service();
        service.create(NewEntry::new(25, "pikachu")).unwrap();
        service.create(NewEntry::new(26, "raichu")).unwrap();

        let err = service.update("raichu", EntryPatch::no(25)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEntry { no: 25 }));
        assert_eq!(service.find_one("raichu").unwrap().no, 26);
    }

    #[test]
    fn test_update_unknown_term() {
        let service = service();
        let err = service.update("missingno", EntryPatch::name("x")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn test_update_empty_patch_returns_entry() {
        let service = service();
        let entry = service.create(NewEntry::new(25, "pikachu")).unwrap();

        let merged = service.update("25", EntryPatch::default()).unwrap();
        assert_eq!(merged, entry);
    }

    #[test]
    fn test_remove() {
        let service = service();
        let entry = service.create(NewEntry::new(25, "pikachu")).unwrap();

        service.remove(&entry.id).unwrap();
        assert_eq!(service.count().unwrap(), 0);

        let err = service.remove(&entry.id).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest { id } if id == entry.id.to_string()));
    }
}
