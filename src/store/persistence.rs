//! Sled-backed implementation of the view store.

use crate::error::{StorageError, MAX_VIEW_NAME_LEN};
use crate::retriever::{
    BaseRetriever, HandPickedRetriever, PickedPage, ResultsRetriever, RetrieverKind,
};
use crate::store::{AssociationStore, RetrieverRecord, ViewRecord, ViewStore};
use crate::types::{NodeId, RetrieverId, ViewId};
use crate::view::View;
use std::path::Path;
use tracing::{debug, info};

/// Sled-backed view store.
///
/// Trees:
/// - `views`: view id -> [`ViewRecord`]
/// - `host_index`: host id ++ view id -> () (prefix scan per host)
/// - `retrievers`: retriever id -> [`RetrieverRecord`]
/// - `picks`: retriever id ++ sort key ++ node id -> [`PickedPage`]
///
/// All key components are big-endian so sled's ordered iteration yields
/// hosts' views and pick lists in key order; the sort key has its sign bit
/// flipped to keep negative sorts ahead of positive ones.
pub struct SledViewStore {
    db: sled::Db,
    views: sled::Tree,
    host_index: sled::Tree,
    retrievers: sled::Tree,
    picks: sled::Tree,
}

fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

fn host_index_key(host: NodeId, view: ViewId) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&host.to_be_bytes());
    key[8..].copy_from_slice(&view.to_be_bytes());
    key
}

fn view_id_from_index_key(key: &[u8]) -> Result<ViewId, StorageError> {
    let bytes: [u8; 8] = key
        .get(8..16)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "malformed host index key",
            ))
        })?;
    Ok(u64::from_be_bytes(bytes))
}

fn pick_key(retriever: RetrieverId, sort: i32, node: NodeId) -> [u8; 20] {
    let mut key = [0u8; 20];
    key[..8].copy_from_slice(&retriever.to_be_bytes());
    key[8..12].copy_from_slice(&((sort as u32) ^ (1 << 31)).to_be_bytes());
    key[12..].copy_from_slice(&node.to_be_bytes());
    key
}

impl SledViewStore {
    /// Open (or create) a view store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let views = db.open_tree("views")?;
        let host_index = db.open_tree("host_index")?;
        let retrievers = db.open_tree("retrievers")?;
        let picks = db.open_tree("picks")?;
        Ok(Self {
            db,
            views,
            host_index,
            retrievers,
            picks,
        })
    }

    fn view_record(&self, view: ViewId) -> Result<ViewRecord, StorageError> {
        match self.views.get(id_key(view))? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(StorageError::ViewNotFound(view)),
        }
    }

    fn retriever_record(&self, retriever: RetrieverId) -> Result<RetrieverRecord, StorageError> {
        match self.retrievers.get(id_key(retriever))? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(StorageError::RetrieverNotFound(retriever)),
        }
    }

    fn picks_for_retriever(&self, retriever: RetrieverId) -> Result<Vec<PickedPage>, StorageError> {
        let mut picks = Vec::new();
        for entry in self.picks.scan_prefix(id_key(retriever)) {
            let (_, value) = entry?;
            picks.push(bincode::deserialize(&value)?);
        }
        Ok(picks)
    }

    /// Revive a retriever instance from its stored record.
    fn load_retriever(
        &self,
        retriever: RetrieverId,
    ) -> Result<Box<dyn ResultsRetriever>, StorageError> {
        let record = self.retriever_record(retriever)?;
        Ok(match record.kind {
            RetrieverKind::Base => Box::new(BaseRetriever),
            RetrieverKind::HandPicked => Box::new(HandPickedRetriever::with_picks(
                record.id,
                self.picks_for_retriever(record.id)?,
            )),
        })
    }

    fn load_view(&self, record: ViewRecord) -> Result<View, StorageError> {
        let retriever = self.load_retriever(record.retriever)?;
        Ok(View::new(record.id, record.name, record.host, retriever))
    }

    /// Total pick-list rows across all retrievers. Maintenance helper for
    /// verifying that cascade deletes leave no orphaned associations.
    pub fn pick_row_count(&self) -> Result<usize, StorageError> {
        let mut count = 0;
        for entry in self.picks.iter() {
            entry?;
            count += 1;
        }
        Ok(count)
    }
}

impl AssociationStore for SledViewStore {
    fn clear_picks(&self, retriever: RetrieverId) -> Result<(), StorageError> {
        let keys: Vec<_> = self
            .picks
            .scan_prefix(id_key(retriever))
            .keys()
            .collect::<Result<_, _>>()?;
        for key in keys {
            self.picks.remove(key)?;
        }
        Ok(())
    }
}

impl ViewStore for SledViewStore {
    fn create_view(
        &self,
        host: NodeId,
        name: &str,
        kind: RetrieverKind,
    ) -> Result<ViewId, StorageError> {
        if name.is_empty() || name.chars().count() > MAX_VIEW_NAME_LEN {
            return Err(StorageError::InvalidViewName(name.to_string()));
        }
        // Names are unique within a host's view set; reads still scan
        // first-match-by-name so pre-existing duplicates behave predictably.
        for entry in self.host_index.scan_prefix(id_key(host)) {
            let (key, _) = entry?;
            let existing = view_id_from_index_key(&key)?;
            if self.view_record(existing)?.name == name {
                return Err(StorageError::DuplicateViewName {
                    host,
                    name: name.to_string(),
                });
            }
        }

        let view_id = self.db.generate_id()?;
        let retriever_id = self.db.generate_id()?;

        let retriever = RetrieverRecord {
            id: retriever_id,
            kind,
        };
        self.retrievers
            .insert(id_key(retriever_id), bincode::serialize(&retriever)?)?;

        let record = ViewRecord {
            id: view_id,
            name: name.to_string(),
            host,
            retriever: retriever_id,
        };
        self.views
            .insert(id_key(view_id), bincode::serialize(&record)?)?;
        self.host_index
            .insert(host_index_key(host, view_id), sled::IVec::default())?;

        info!(view = view_id, host, name, kind = kind.name(), "created view");
        Ok(view_id)
    }

    fn views_for_host(&self, host: NodeId) -> Result<Vec<View>, StorageError> {
        let mut views = Vec::new();
        for entry in self.host_index.scan_prefix(id_key(host)) {
            let (key, _) = entry?;
            let view_id = view_id_from_index_key(&key)?;
            views.push(self.load_view(self.view_record(view_id)?)?);
        }
        Ok(views)
    }

    fn get_view(&self, host: NodeId, name: &str) -> Result<Option<View>, StorageError> {
        for view in self.views_for_host(host)? {
            if view.name() == name {
                return Ok(Some(view));
            }
        }
        Ok(None)
    }

    fn add_pick(&self, view: ViewId, node: NodeId, sort: i32) -> Result<(), StorageError> {
        let record = self.view_record(view)?;
        let pick = PickedPage { node, sort };
        self.picks.insert(
            pick_key(record.retriever, sort, node),
            bincode::serialize(&pick)?,
        )?;
        Ok(())
    }

    fn picks(&self, view: ViewId) -> Result<Vec<PickedPage>, StorageError> {
        let record = self.view_record(view)?;
        self.picks_for_retriever(record.retriever)
    }

    fn delete_view(&self, view: ViewId) -> Result<(), StorageError> {
        let record = self.view_record(view)?;
        let retriever = self.load_retriever(record.retriever)?;

        // Cascade: associations, then the retriever row, then the view row.
        // The first failing step propagates so orphans never go unnoticed.
        retriever.release(self)?;
        self.retrievers.remove(id_key(record.retriever))?;
        self.host_index
            .remove(host_index_key(record.host, record.id))?;
        self.views.remove(id_key(record.id))?;

        debug!(view, retriever = record.retriever, "deleted view cascade");
        Ok(())
    }
}
