//! Hand-picked results retriever: a manually ordered pick-list of nodes.

use crate::error::StorageError;
use crate::error::ViewError;
use crate::retriever::{ResultsRetriever, RetrieverKind};
use crate::store::AssociationStore;
use crate::tree::{ContentNode, ContentTree, LocaleFilter};
use crate::types::{NodeId, RetrieverId};
use serde::{Deserialize, Serialize};

/// One pick-list row: a node reference plus its editor-controlled sort key.
///
/// Sort keys are plain integers used only for ordering; they need not be
/// contiguous, and the same node may appear more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedPage {
    pub node: NodeId,
    pub sort: i32,
}

/// The simplest retriever: editors pick the result nodes by hand and order
/// them as they wish.
#[derive(Debug)]
pub struct HandPickedRetriever {
    id: RetrieverId,
    picks: Vec<PickedPage>,
}

impl HandPickedRetriever {
    pub fn new(id: RetrieverId) -> Self {
        Self::with_picks(id, Vec::new())
    }

    pub fn with_picks(id: RetrieverId, mut picks: Vec<PickedPage>) -> Self {
        picks.sort_by_key(|pick| pick.sort);
        Self { id, picks }
    }

    pub fn id(&self) -> RetrieverId {
        self.id
    }

    /// The pick-list rows in ascending sort order.
    pub fn picks(&self) -> &[PickedPage] {
        &self.picks
    }
}

impl ResultsRetriever for HandPickedRetriever {
    fn kind(&self) -> RetrieverKind {
        RetrieverKind::HandPicked
    }

    /// Returns the pick list in sort order.
    ///
    /// Nodes are fetched without locale scoping so the same pick list is
    /// visible regardless of which translation is being viewed; translation
    /// matching happens later in the view layer. Picks whose node no longer
    /// exists are skipped.
    ///
    /// `max_results` is accepted for interface conformance but not applied:
    /// the full list is always returned. Callers must tolerate this
    /// inconsistency with the base contract.
    fn results(
        &self,
        tree: &dyn ContentTree,
        _max_results: usize,
    ) -> Result<Vec<ContentNode>, ViewError> {
        Ok(self
            .picks
            .iter()
            .filter_map(|pick| tree.fetch(pick.node, LocaleFilter::Unscoped))
            .collect())
    }

    fn summary(&self, tree: &dyn ContentTree) -> String {
        let mut lines = Vec::with_capacity(self.picks.len());
        for pick in &self.picks {
            if let Some(node) = tree.fetch(pick.node, LocaleFilter::Unscoped) {
                lines.push(format!("Page reference: [{}] {}", node.id, node.title));
            }
        }
        lines.join("\n")
    }

    /// Releases the pick-list rows before the retriever record is removed.
    fn release(&self, associations: &dyn AssociationStore) -> Result<(), StorageError> {
        associations.clear_picks(self.id)
    }
}
