use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use tempfile::tempdir;

#[test]
fn get_returns_absent_for_missing_keys() {
    let store = MemoryDocumentStore::new();
    assert_eq!(store.get("script::mario"), None);
    assert!(store.is_empty());
}

#[test]
fn set_then_get_round_trips() {
    let store = MemoryDocumentStore::new();
    store.set("script::mario", "let x=1").unwrap();
    assert_eq!(store.get("script::mario").as_deref(), Some("let x=1"));
    assert_eq!(store.len(), 1);
}

#[test]
fn clones_share_the_same_values() {
    let store = MemoryDocumentStore::new();
    let alias = store.clone();
    store.set("k", "v").unwrap();
    assert_eq!(alias.get("k").as_deref(), Some("v"));
}

#[test]
fn subscribers_run_on_every_write_to_their_key() {
    let store = MemoryDocumentStore::new();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = store.subscribe(
        "script::mario",
        Box::new(move |value| sink.borrow_mut().push(value.to_string())),
    );

    store.set("script::mario", "a").unwrap();
    store.set("script::other", "x").unwrap();
    // Same-value writes still notify; idempotence is the consumer's concern.
    store.set("script::mario", "a").unwrap();

    assert_eq!(*seen.borrow(), vec!["a".to_string(), "a".to_string()]);
}

#[test]
fn dropping_the_subscription_stops_notifications() {
    let store = MemoryDocumentStore::new();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let sub = store.subscribe(
        "k",
        Box::new(move |value| sink.borrow_mut().push(value.to_string())),
    );

    store.set("k", "first").unwrap();
    drop(sub);
    store.set("k", "second").unwrap();

    assert_eq!(*seen.borrow(), vec!["first".to_string()]);
}

#[test]
fn listener_may_write_back_into_the_store() {
    let store = MemoryDocumentStore::new();
    let alias = store.clone();
    let _sub = store.subscribe(
        "source",
        Box::new(move |value| {
            alias.set("copy", value).unwrap();
        }),
    );

    store.set("source", "payload").unwrap();
    assert_eq!(store.get("copy").as_deref(), Some("payload"));
}

#[test]
fn json_persistence_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("documents.json");

    let store = MemoryDocumentStore::new();
    store.set("script::mario", "let x=1").unwrap();
    store.set("scene::mario", "{}").unwrap();
    store.save_json(&path).unwrap();

    let loaded = MemoryDocumentStore::load_json(&path).unwrap();
    assert_eq!(loaded.get("script::mario").as_deref(), Some("let x=1"));
    assert_eq!(loaded.get("scene::mario").as_deref(), Some("{}"));
}

#[test]
fn load_json_of_missing_file_yields_empty_store() {
    let dir = tempdir().unwrap();
    let store = MemoryDocumentStore::load_json(&dir.path().join("absent.json")).unwrap();
    assert!(store.is_empty());
}
