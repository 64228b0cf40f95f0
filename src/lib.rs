//! Siteviews: Named Content Views
//!
//! Lets a content system attach named "views" (saved queries) to content
//! nodes. Each view delegates to a pluggable results retriever, and templates
//! resolve views by name with a locale-then-parent fallback walk over the
//! content tree.

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod retriever;
pub mod store;
pub mod tree;
pub mod types;
pub mod view;
