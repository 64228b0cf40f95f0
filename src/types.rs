//! Core types for the siteviews content view system.

/// NodeId: Identifier of a content-tree node (externally allocated)
pub type NodeId = u64;

/// ViewId: Identifier of a stored view (store-allocated)
pub type ViewId = u64;

/// RetrieverId: Identifier of a stored results retriever (store-allocated)
pub type RetrieverId = u64;

/// Locale: BCP 47 language identifier (e.g. "en-US", "de-DE")
pub type Locale = unic_langid::LanguageIdentifier;
