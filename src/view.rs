//! Views
//!
//! A view is a named placeholder on a content node whose results come from a
//! pluggable retriever. Templates ask a resolved view for its results, either
//! raw or matched into the locale of the page being rendered.

use crate::error::ViewError;
use crate::retriever::ResultsRetriever;
use crate::tree::{ContentNode, ContentTree, LocaleFilter};
use crate::types::{NodeId, ViewId};

/// Request-scoped rendering context.
///
/// Replaces the ambient "current page" accessor of traditional template
/// engines with an explicit value the caller threads in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    current_page: Option<NodeId>,
}

impl RenderContext {
    /// Context for rendering the given page.
    pub fn for_page(id: NodeId) -> Self {
        Self {
            current_page: Some(id),
        }
    }

    /// Context with no current page (e.g. background jobs, tests).
    pub fn detached() -> Self {
        Self { current_page: None }
    }

    pub fn current_page(&self) -> Option<NodeId> {
        self.current_page
    }
}

/// A named binding between a host node and a results retriever.
pub struct View {
    id: ViewId,
    name: String,
    host: NodeId,
    retriever: Box<dyn ResultsRetriever>,
}

impl View {
    pub fn new(id: ViewId, name: String, host: NodeId, retriever: Box<dyn ResultsRetriever>) -> Self {
        Self {
            id,
            name,
            host,
            retriever,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn retriever(&self) -> &dyn ResultsRetriever {
        self.retriever.as_ref()
    }

    /// False while the view still carries the base placeholder retriever.
    /// Callers check this before exposing edit affordances.
    pub fn has_concrete_retriever(&self) -> bool {
        !self.retriever.is_placeholder()
    }

    /// Raw results straight from the retriever. `max_results == 0` means
    /// unbounded.
    pub fn results(
        &self,
        tree: &dyn ContentTree,
        max_results: usize,
    ) -> Result<Vec<ContentNode>, ViewError> {
        self.retriever.results(tree, max_results)
    }

    /// Results matched into the locale of the page being rendered.
    ///
    /// When the context has no current page, or the current page is not
    /// localized, the raw results are returned unchanged. Otherwise each
    /// result is mapped to its counterpart in the current page's locale;
    /// results without a counterpart (including non-localized results) are
    /// dropped, order preserved.
    ///
    /// `max_results` bounds the pre-translation fetch, not the post-filter
    /// output: with sparse translations, callers can receive fewer items than
    /// requested even when enough untranslated candidates exist.
    pub fn translated_results(
        &self,
        tree: &dyn ContentTree,
        ctx: &RenderContext,
        max_results: usize,
    ) -> Result<Vec<ContentNode>, ViewError> {
        let results = self.retriever.results(tree, max_results)?;
        if results.is_empty() {
            return Ok(results);
        }

        let current = ctx
            .current_page()
            .and_then(|id| tree.fetch(id, LocaleFilter::Unscoped));
        let locale = match current.and_then(|page| page.locale) {
            Some(locale) => locale,
            None => return Ok(results),
        };

        let mut translated = Vec::new();
        for result in results {
            if result.locale.is_none() {
                continue;
            }
            if let Some(counterpart) = tree.translation_of(result.id, &locale) {
                if let Some(node) = tree.fetch(counterpart, LocaleFilter::Unscoped) {
                    translated.push(node);
                }
            }
        }
        Ok(translated)
    }

    /// Plain-text administrative summary of the view and its retriever.
    pub fn summary(&self, tree: &dyn ContentTree) -> String {
        format!(
            "{} ({})\n{}",
            self.name,
            self.retriever.kind().name(),
            self.retriever.summary(tree)
        )
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("retriever", &self.retriever.kind().name())
            .finish()
    }
}
