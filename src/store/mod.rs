//! View Store
//!
//! Persistence port for views, their retrievers, and the hand-picked
//! association rows. Views and retrievers are one-to-one; deleting a view
//! cascades through its retriever and the retriever's associations as one
//! logical operation.

pub mod persistence;

pub use persistence::SledViewStore;

use crate::error::StorageError;
use crate::retriever::{PickedPage, RetrieverKind};
use crate::types::{NodeId, RetrieverId, ViewId};
use crate::view::View;
use serde::{Deserialize, Serialize};

/// Stored view row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: ViewId,
    pub name: String,
    pub host: NodeId,
    pub retriever: RetrieverId,
}

/// Stored retriever row. Variant data (pick-list rows) lives in its own tree,
/// keyed by retriever id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverRecord {
    pub id: RetrieverId,
    pub kind: RetrieverKind,
}

/// Association cleanup seen by retriever deletion hooks.
pub trait AssociationStore {
    /// Remove every pick-list row owned by the given retriever.
    fn clear_picks(&self, retriever: RetrieverId) -> Result<(), StorageError>;
}

/// View store interface
pub trait ViewStore {
    /// Create a view with a fresh retriever of the given kind. The name must
    /// be 1-32 characters and unique within the host's view set.
    fn create_view(
        &self,
        host: NodeId,
        name: &str,
        kind: RetrieverKind,
    ) -> Result<ViewId, StorageError>;

    /// All views attached to a host, with their retrievers revived.
    fn views_for_host(&self, host: NodeId) -> Result<Vec<View>, StorageError>;

    /// Local-only lookup: first view on the host whose name matches.
    fn get_view(&self, host: NodeId, name: &str) -> Result<Option<View>, StorageError>;

    /// Append a pick-list row to the view's retriever.
    fn add_pick(&self, view: ViewId, node: NodeId, sort: i32) -> Result<(), StorageError>;

    /// Pick-list rows of the view's retriever in ascending sort order.
    fn picks(&self, view: ViewId) -> Result<Vec<PickedPage>, StorageError>;

    /// Delete the view, its retriever, and the retriever's associations.
    /// A mid-cascade failure propagates rather than being swallowed.
    fn delete_view(&self, view: ViewId) -> Result<(), StorageError>;
}
