//! Results Retrievers
//!
//! A view delegates result production to a retriever. The base contract lives
//! here together with the closed set of retriever kinds and the registry the
//! administrative create-view flow uses to instantiate them.

pub mod hand_picked;

pub use hand_picked::{HandPickedRetriever, PickedPage};

use crate::error::{StorageError, ViewError};
use crate::store::AssociationStore;
use crate::tree::{ContentNode, ContentTree};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed set of retriever kinds, as persisted in retriever records.
///
/// Adding a variant means extending this enum, registering it in
/// [`RetrieverRegistry::with_builtins`], and teaching the store to revive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrieverKind {
    /// Placeholder assigned to a view whose retriever has not been configured.
    Base,
    /// Manually ordered pick-list of content nodes.
    HandPicked,
}

impl RetrieverKind {
    pub fn name(&self) -> &'static str {
        match self {
            RetrieverKind::Base => "base",
            RetrieverKind::HandPicked => "hand_picked",
        }
    }
}

/// Contract every results retriever fulfils.
///
/// The default method bodies are the "abstract" base variant: a view that
/// still carries it is misconfigured or transient, so `results` fails loudly
/// instead of pretending the view is empty. Callers must check
/// [`is_placeholder`](ResultsRetriever::is_placeholder) before exposing edit
/// affordances.
pub trait ResultsRetriever: Send + Sync {
    fn kind(&self) -> RetrieverKind;

    /// Produce the ordered result set. `max_results == 0` means unbounded.
    /// "No results" is `Ok(vec![])`, never an error.
    fn results(
        &self,
        tree: &dyn ContentTree,
        max_results: usize,
    ) -> Result<Vec<ContentNode>, ViewError> {
        let _ = (tree, max_results);
        Err(ViewError::Unimplemented(self.kind().name()))
    }

    /// Short descriptive text for administrative display.
    fn summary(&self, tree: &dyn ContentTree) -> String {
        let _ = tree;
        format!(
            "The {} results retriever needs to implement summary().",
            self.kind().name()
        )
    }

    /// Deletion hook: release any association rows this retriever owns. Runs
    /// before the retriever record itself is removed.
    fn release(&self, associations: &dyn AssociationStore) -> Result<(), StorageError> {
        let _ = associations;
        Ok(())
    }

    /// True only for the base placeholder variant.
    fn is_placeholder(&self) -> bool {
        false
    }
}

/// The retriever a freshly created view carries until an editor assigns a
/// concrete one.
#[derive(Debug, Default)]
pub struct BaseRetriever;

impl ResultsRetriever for BaseRetriever {
    fn kind(&self) -> RetrieverKind {
        RetrieverKind::Base
    }

    fn is_placeholder(&self) -> bool {
        true
    }
}

/// Registry of kinds the administrative create-view flow may instantiate.
///
/// The traversal engine never consults this; stored views are revived from
/// their persisted kind tag directly.
pub struct RetrieverRegistry {
    kinds: HashMap<&'static str, RetrieverKind>,
}

impl Default for RetrieverRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RetrieverRegistry {
    /// Empty registry with no creatable kinds.
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in kinds. The base placeholder
    /// is deliberately absent: editors never create it directly.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RetrieverKind::HandPicked);
        registry
    }

    pub fn register(&mut self, kind: RetrieverKind) {
        self.kinds.insert(kind.name(), kind);
    }

    /// Look up a kind by its editor-facing name.
    pub fn lookup(&self, name: &str) -> Result<RetrieverKind, ViewError> {
        self.kinds
            .get(name)
            .copied()
            .ok_or_else(|| ViewError::UnknownRetrieverKind(name.to_string()))
    }

    /// Names of all creatable kinds, sorted for stable display.
    pub fn kind_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.kinds.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
