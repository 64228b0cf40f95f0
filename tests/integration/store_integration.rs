//! Store round-trips: creation, validation, ordering, reopen persistence.

use crate::integration::test_utils::TestStore;
use siteviews::error::StorageError;
use siteviews::retriever::{RetrieverKind, RetrieverRegistry};
use siteviews::store::{SledViewStore, ViewStore};
use tempfile::TempDir;

#[test]
fn create_and_get_view_round_trip() {
    let fixture = TestStore::open();
    let id = fixture
        .store
        .create_view(1, "Featured", RetrieverKind::HandPicked)
        .unwrap();

    let view = fixture
        .store
        .get_view(1, "Featured")
        .unwrap()
        .expect("view exists");
    assert_eq!(view.id(), id);
    assert_eq!(view.name(), "Featured");
    assert_eq!(view.host(), 1);
    assert_eq!(view.retriever().kind(), RetrieverKind::HandPicked);
    assert!(view.has_concrete_retriever());

    assert!(fixture.store.get_view(1, "Other").unwrap().is_none());
    assert!(fixture.store.get_view(2, "Featured").unwrap().is_none());
}

#[test]
fn freshly_created_base_view_is_a_placeholder() {
    let fixture = TestStore::open();
    fixture
        .store
        .create_view(1, "New", RetrieverKind::Base)
        .unwrap();
    let view = fixture.store.get_view(1, "New").unwrap().unwrap();
    assert!(!view.has_concrete_retriever());
}

#[test]
fn duplicate_names_are_rejected_per_host() {
    let fixture = TestStore::open();
    fixture
        .store
        .create_view(1, "Featured", RetrieverKind::HandPicked)
        .unwrap();
    assert!(matches!(
        fixture
            .store
            .create_view(1, "Featured", RetrieverKind::HandPicked),
        Err(StorageError::DuplicateViewName { host: 1, .. })
    ));
    // Same name on another host is fine.
    fixture
        .store
        .create_view(2, "Featured", RetrieverKind::HandPicked)
        .unwrap();
}

#[test]
fn view_names_are_length_validated() {
    let fixture = TestStore::open();
    assert!(matches!(
        fixture.store.create_view(1, "", RetrieverKind::HandPicked),
        Err(StorageError::InvalidViewName(_))
    ));
    let long = "x".repeat(33);
    assert!(matches!(
        fixture.store.create_view(1, &long, RetrieverKind::HandPicked),
        Err(StorageError::InvalidViewName(_))
    ));
    let max = "x".repeat(32);
    assert!(fixture
        .store
        .create_view(1, &max, RetrieverKind::HandPicked)
        .is_ok());
}

#[test]
fn picks_come_back_in_sort_order() {
    let fixture = TestStore::open();
    let view = fixture
        .store
        .create_view(1, "Featured", RetrieverKind::HandPicked)
        .unwrap();
    fixture.store.add_pick(view, 10, 5).unwrap();
    fixture.store.add_pick(view, 11, -2).unwrap();
    fixture.store.add_pick(view, 12, 0).unwrap();

    let picks = fixture.store.picks(view).unwrap();
    let order: Vec<(u64, i32)> = picks.iter().map(|p| (p.node, p.sort)).collect();
    assert_eq!(order, vec![(11, -2), (12, 0), (10, 5)]);
}

#[test]
fn duplicate_nodes_in_a_pick_list_are_allowed() {
    let fixture = TestStore::open();
    let view = fixture
        .store
        .create_view(1, "Featured", RetrieverKind::HandPicked)
        .unwrap();
    fixture.store.add_pick(view, 10, 0).unwrap();
    fixture.store.add_pick(view, 10, 3).unwrap();
    assert_eq!(fixture.store.picks(view).unwrap().len(), 2);
}

#[test]
fn views_survive_a_store_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("views.db");

    let view = {
        let store = SledViewStore::open(&path).unwrap();
        let view = store
            .create_view(7, "Featured", RetrieverKind::HandPicked)
            .unwrap();
        store.add_pick(view, 10, 0).unwrap();
        view
    };

    let store = SledViewStore::open(&path).unwrap();
    let reloaded = store.get_view(7, "Featured").unwrap().expect("persisted");
    assert_eq!(reloaded.id(), view);
    assert_eq!(store.picks(view).unwrap().len(), 1);
}

#[test]
fn registry_backed_create_flow() {
    // The administrative flow maps an editor-chosen kind name through the
    // registry before asking the store to create the view.
    let fixture = TestStore::open();
    let registry = RetrieverRegistry::with_builtins();
    let kind = registry.lookup("hand_picked").unwrap();
    fixture.store.create_view(1, "Featured", kind).unwrap();
    let view = fixture.store.get_view(1, "Featured").unwrap().unwrap();
    assert_eq!(view.retriever().kind(), RetrieverKind::HandPicked);
}
