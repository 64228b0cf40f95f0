//! View Resolution
//!
//! The traversal engine behind template lookups: resolve a named view on a
//! node by checking the node itself, then its default-locale translation,
//! then the parent chain.

use crate::error::ViewError;
use crate::store::ViewStore;
use crate::tree::{ContentTree, LocaleFilter};
use crate::types::NodeId;
use crate::view::{RenderContext, View};
use tracing::debug;

/// Arguments a template passes when asking for a view.
///
/// `max_results` is carried with the lookup so result fetches on the resolved
/// view use the bound the template asked for; the traversal itself never
/// consumes it. `0` means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct ViewLookup<'a> {
    pub name: &'a str,
    pub max_results: usize,
    pub traverse: bool,
}

impl<'a> ViewLookup<'a> {
    /// Lookup with the template defaults: unbounded results, traversal on.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            max_results: 0,
            traverse: true,
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn no_traverse(mut self) -> Self {
        self.traverse = false;
        self
    }
}

/// Resolves named views against a content tree and a view store.
pub struct ViewResolver<'a> {
    tree: &'a dyn ContentTree,
    store: &'a dyn ViewStore,
}

impl<'a> ViewResolver<'a> {
    pub fn new(tree: &'a dyn ContentTree, store: &'a dyn ViewStore) -> Self {
        Self { tree, store }
    }

    /// Local-only lookup: first view attached to `node` whose name matches.
    pub fn local_view(&self, node: NodeId, name: &str) -> Result<Option<View>, ViewError> {
        Ok(self.store.get_view(node, name)?)
    }

    /// Resolve a named view on `node`.
    ///
    /// A local view always wins, traversal flag or not. On a local miss with
    /// traversal enabled, the node's default-locale counterpart gets a
    /// local-only check, then the parent chain is searched recursively until
    /// a root terminates the walk.
    pub fn resolve_view(
        &self,
        node: NodeId,
        lookup: &ViewLookup<'_>,
    ) -> Result<Option<View>, ViewError> {
        let Some(current) = self.tree.fetch(node, LocaleFilter::Unscoped) else {
            return Ok(None);
        };

        // Attempt 1: the node itself.
        if let Some(view) = self.local_view(node, lookup.name)? {
            debug!(node, name = lookup.name, "view found locally");
            return Ok(Some(view));
        }
        if !lookup.traverse {
            return Ok(None);
        }

        // Attempt 2: the node's default-locale counterpart, local-only.
        let default_locale = self.tree.default_locale();
        if let Some(locale) = &current.locale {
            if *locale != default_locale {
                if let Some(master) = self.tree.translation_of(node, &default_locale) {
                    if self.tree.hosts_views(master) {
                        if let Some(view) = self.local_view(master, lookup.name)? {
                            debug!(
                                node,
                                master,
                                name = lookup.name,
                                "view found on default-locale translation"
                            );
                            return Ok(Some(view));
                        }
                    }
                }
            }
        }

        // Attempt 3: the parent chain, full recursion.
        if let Some(parent) = current.parent {
            if self.tree.hosts_views(parent) {
                return self.resolve_view(parent, lookup);
            }
        }

        Ok(None)
    }

    /// Whether the lookup resolves to a view at all.
    pub fn has_view(&self, node: NodeId, lookup: &ViewLookup<'_>) -> Result<bool, ViewError> {
        Ok(self.resolve_view(node, lookup)?.is_some())
    }

    /// Whether the lookup resolves to a view that has at least one result in
    /// the locale of the page being rendered. A single-item probe: with
    /// sparse translations this can differ from fetching the full set.
    pub fn has_view_with_translated_results(
        &self,
        node: NodeId,
        lookup: &ViewLookup<'_>,
        ctx: &RenderContext,
    ) -> Result<bool, ViewError> {
        match self.resolve_view(node, lookup)? {
            Some(view) => Ok(!view.translated_results(self.tree, ctx, 1)?.is_empty()),
            None => Ok(false),
        }
    }
}
