//! Content Tree
//!
//! Port for the content system that owns the page hierarchy. The core only
//! needs node fetch (with an optional locale scope), parent links via the
//! fetched node, translation lookup, and the view-hosting capability check.

pub mod memory;

pub use memory::InMemoryTree;

use crate::types::{Locale, NodeId};

/// A content-tree node as seen by this crate.
///
/// `locale == None` means the node does not participate in localization at
/// all (the surrounding content system never translated it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    pub id: NodeId,
    pub title: String,
    pub parent: Option<NodeId>,
    pub locale: Option<Locale>,
}

/// Locale scoping applied to a node fetch.
///
/// `Scoped` hides nodes that carry a different locale; nodes without a locale
/// are unaffected. `Unscoped` is the explicit override for callers that must
/// see every translation (e.g. the hand-picked retriever).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleFilter<'a> {
    Scoped(&'a Locale),
    Unscoped,
}

/// Content tree interface
pub trait ContentTree {
    /// Fetch a node by id, subject to the given locale filter.
    fn fetch(&self, id: NodeId, filter: LocaleFilter<'_>) -> Option<ContentNode>;

    /// The system default locale (the designated primary translation).
    fn default_locale(&self) -> Locale;

    /// Resolve the counterpart of `id` in `locale`, identity included: a node
    /// already in `locale` resolves to itself. `None` when the node is
    /// unknown, not localized, or has no counterpart in that locale.
    fn translation_of(&self, id: NodeId, locale: &Locale) -> Option<NodeId>;

    /// Whether the node carries the view-hosting capability. Unknown ids are
    /// not hosts.
    fn hosts_views(&self, id: NodeId) -> bool;
}
