//! Translation matching of resolved view results.

use crate::integration::test_utils::{english_tree, page, TestStore};
use siteviews::error::ViewError;
use siteviews::host::{ViewLookup, ViewResolver};
use siteviews::retriever::RetrieverKind;
use siteviews::store::ViewStore;
use siteviews::tree::InMemoryTree;
use siteviews::types::NodeId;
use siteviews::view::RenderContext;

/// Pages 10-12 in en-US; only 11 has a de-DE counterpart (21). Page 30 is a
/// de-DE page hosting the lookup and being rendered.
fn sparse_tree() -> InMemoryTree {
    let tree = english_tree();
    for id in [10, 11, 12] {
        tree.add_node(page(id, None, Some("en-US")));
    }
    tree.add_node(page(21, None, Some("de-DE")));
    tree.link_translations(11, 21);
    tree.add_node(page(30, None, Some("de-DE")));
    tree
}

fn picked_view(store: &impl ViewStore, host: NodeId, picks: &[NodeId]) -> u64 {
    let view = store
        .create_view(host, "Featured", RetrieverKind::HandPicked)
        .unwrap();
    for (i, node) in picks.iter().enumerate() {
        store.add_pick(view, *node, i as i32).unwrap();
    }
    view
}

#[test]
fn only_translated_results_survive_in_order() {
    let tree = sparse_tree();
    let fixture = TestStore::open();
    picked_view(&fixture.store, 30, &[10, 11, 12]);

    let resolver = ViewResolver::new(&tree, &fixture.store);
    let view = resolver
        .resolve_view(30, &ViewLookup::new("Featured"))
        .unwrap()
        .expect("view resolves locally");

    let results = view
        .translated_results(&tree, &RenderContext::for_page(30), 0)
        .unwrap();
    let ids: Vec<NodeId> = results.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![21]);
}

#[test]
fn raw_results_pass_through_without_locale_context() {
    let tree = sparse_tree();
    tree.add_node(page(40, None, None)); // unlocalized current page
    let fixture = TestStore::open();
    picked_view(&fixture.store, 40, &[10, 11, 12]);

    let resolver = ViewResolver::new(&tree, &fixture.store);
    let view = resolver
        .resolve_view(40, &ViewLookup::new("Featured"))
        .unwrap()
        .unwrap();

    assert_eq!(
        view.translated_results(&tree, &RenderContext::for_page(40), 0)
            .unwrap()
            .len(),
        3
    );
    assert_eq!(
        view.translated_results(&tree, &RenderContext::detached(), 0)
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn probe_is_false_for_empty_retriever() {
    let tree = sparse_tree();
    let fixture = TestStore::open();
    picked_view(&fixture.store, 30, &[]);

    let resolver = ViewResolver::new(&tree, &fixture.store);
    assert!(!resolver
        .has_view_with_translated_results(
            30,
            &ViewLookup::new("Featured"),
            &RenderContext::for_page(30)
        )
        .unwrap());
}

#[test]
fn probe_is_false_when_nothing_is_translated() {
    let tree = sparse_tree();
    let fixture = TestStore::open();
    picked_view(&fixture.store, 30, &[10, 12]);

    let resolver = ViewResolver::new(&tree, &fixture.store);
    assert!(!resolver
        .has_view_with_translated_results(
            30,
            &ViewLookup::new("Featured"),
            &RenderContext::for_page(30)
        )
        .unwrap());
}

#[test]
fn probe_is_true_with_a_translated_result() {
    let tree = sparse_tree();
    let fixture = TestStore::open();
    picked_view(&fixture.store, 30, &[10, 11]);

    let resolver = ViewResolver::new(&tree, &fixture.store);
    assert!(resolver
        .has_view_with_translated_results(
            30,
            &ViewLookup::new("Featured"),
            &RenderContext::for_page(30)
        )
        .unwrap());
}

#[test]
fn probe_is_false_when_no_view_resolves() {
    let tree = sparse_tree();
    let fixture = TestStore::open();

    let resolver = ViewResolver::new(&tree, &fixture.store);
    assert!(!resolver
        .has_view_with_translated_results(
            30,
            &ViewLookup::new("Featured"),
            &RenderContext::for_page(30)
        )
        .unwrap());
}

#[test]
fn base_retriever_fails_loudly_through_the_probe() {
    let tree = sparse_tree();
    let fixture = TestStore::open();
    fixture
        .store
        .create_view(30, "Featured", RetrieverKind::Base)
        .unwrap();

    let resolver = ViewResolver::new(&tree, &fixture.store);
    let err = resolver
        .has_view_with_translated_results(
            30,
            &ViewLookup::new("Featured"),
            &RenderContext::for_page(30),
        )
        .unwrap_err();
    assert!(matches!(err, ViewError::Unimplemented("base")));

    // The view still resolves; only its results are unusable.
    let view = resolver
        .resolve_view(30, &ViewLookup::new("Featured"))
        .unwrap()
        .unwrap();
    assert!(!view.has_concrete_retriever());
}
