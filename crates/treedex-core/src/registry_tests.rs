//! Tests for `IndexRegistry`.

use std::collections::BTreeMap;

use tempfile::TempDir;

use super::config::IndexConfig;
use super::error::Error;
use super::field::Field;
use super::index::FlushStatus;
use super::record::{Contact, RecordId};
use super::registry::IndexRegistry;
use super::tree::TreeVariant;

fn contact(id: RecordId, given_name: &str, email: &str) -> Contact {
    Contact::new(given_name, "Doe", "jd", "55500000", email, "Main St", "01/01/2000").with_id(id)
}

fn store() -> BTreeMap<RecordId, Contact> {
    [
        contact(1, "Ann", "ann@example.com"),
        contact(2, "Bob", "bob@example.com"),
        contact(3, "Ann", "ann2@example.com"),
    ]
    .into_iter()
    .map(|c| (c.id, c))
    .collect()
}

#[test]
fn test_create_index_builds_and_flushes() {
    let dir = TempDir::new().expect("tempdir");
    let store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);

    let status = registry.create_index(Field::GivenName, TreeVariant::Bst, store.values());
    let path = dir.path().join("given_name-bst.txt");
    assert_eq!(status, FlushStatus::Saved(path.clone()));
    // Ann(1) root, Bob(2) right
    assert_eq!(std::fs::read_to_string(path).expect("file"), "1,null,2");

    let index = registry.get(Field::GivenName).expect("index registered");
    assert!(!index.is_dirty());
    assert_eq!(index.bucket("Ann"), &[1, 3]);
}

#[test]
fn test_create_default_index_uses_default_variant() {
    let dir = TempDir::new().expect("tempdir");
    let store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);

    registry.create_default_index(Field::Email, store.values());
    assert_eq!(
        registry.get(Field::Email).map(|index| index.variant()),
        Some(TreeVariant::Avl)
    );
    assert!(dir.path().join("email-avl.txt").exists());
}

#[test]
fn test_create_index_replaces_previous() {
    let dir = TempDir::new().expect("tempdir");
    let store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);

    registry.create_index(Field::Email, TreeVariant::Avl, store.values());
    registry.create_index(Field::Email, TreeVariant::Bst, store.values().take(1));

    assert_eq!(registry.len(), 1);
    let index = registry.get(Field::Email).expect("index");
    assert_eq!(index.variant(), TreeVariant::Bst);
    assert_eq!(index.tree().len(), 1);
}

#[test]
fn test_record_upserted_reaches_every_index() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);
    registry.create_default_index(Field::GivenName, store.values());
    registry.create_default_index(Field::Email, store.values());

    let dee = contact(4, "Dee", "dee@example.com");
    store.insert(dee.id, dee.clone());
    registry.record_upserted(&dee);

    assert_eq!(registry.search(Field::GivenName, "Dee", &store).unwrap().len(), 1);
    assert_eq!(registry.search(Field::Email, "dee@example.com", &store).unwrap().len(), 1);
    assert!(registry.get(Field::Email).expect("index").is_dirty());

    let statuses = registry.flush_all();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|(_, status)| status.is_saved()));
    assert!(registry.flush_all().iter().all(|(_, status)| *status == FlushStatus::Clean));
}

#[test]
fn test_rebuild_all_after_delete() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Bst);
    registry.create_default_index(Field::GivenName, store.values());

    store.remove(&1);
    registry.rebuild_all(&store);

    let hits = registry.search(Field::GivenName, "Ann", &store).unwrap();
    assert_eq!(hits.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_search_unindexed_field() {
    let dir = TempDir::new().expect("tempdir");
    let registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);
    let err = registry.search(Field::Phone, "555", &store()).unwrap_err();
    assert!(matches!(err, Error::IndexNotFound(field) if field == "phone"));
}

#[test]
fn test_drop_index_and_fields() {
    let dir = TempDir::new().expect("tempdir");
    let store = store();
    let mut registry = IndexRegistry::new(dir.path(), TreeVariant::Avl);
    assert!(registry.is_empty());

    registry.create_default_index(Field::Email, store.values());
    registry.create_default_index(Field::Id, store.values());
    assert_eq!(registry.fields().collect::<Vec<_>>(), vec![Field::Id, Field::Email]);

    assert!(registry.drop_index(Field::Id).is_some());
    assert!(registry.drop_index(Field::Id).is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_from_config() {
    let config = IndexConfig {
        dir: "indexes".into(),
        variant: TreeVariant::Bst,
    };
    let registry = IndexRegistry::from_config(&config);
    assert_eq!(registry.dir(), std::path::Path::new("indexes"));
    assert_eq!(registry.default_variant(), TreeVariant::Bst);
}
