//! Integration tests for state persisted to a JSON file.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use furnishme_core::ProductId;
use furnishme_integration_tests::{login_demo, messages};
use furnishme_storefront::error::STORAGE_FAILURE_MESSAGE;
use furnishme_storefront::models::session_keys;
use furnishme_storefront::storage::{FileStorage, KeyValueStore};
use furnishme_storefront::{AppState, Event, StorefrontConfig, dispatch};

fn open(path: &std::path::Path) -> AppState<FileStorage> {
    AppState::load(FileStorage::open(path).unwrap(), &StorefrontConfig::default()).unwrap()
}

#[test]
fn test_first_run_writes_seeded_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("furnishme.json");

    let _state = open(&path);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let users: serde_json::Value =
        serde_json::from_str(raw[session_keys::USERS].as_str().unwrap()).unwrap();
    assert_eq!(users[0]["email"], "demo@furnishme.com");
    assert_eq!(users[0]["id"], 1);
    assert!(users[0]["createdAt"].is_string());
}

#[test]
fn test_reload_restores_every_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("furnishme.json");

    {
        let mut state = open(&path);
        login_demo(&mut state);
        dispatch(&mut state, Event::AddToCart(ProductId::new(3)));
        dispatch(&mut state, Event::AddToCart(ProductId::new(3)));
        dispatch(&mut state, Event::AddToCart(ProductId::new(8)));
    }

    let state = open(&path);
    assert!(state.session().is_logged_in());
    assert_eq!(state.cart().len(), 2);
    assert_eq!(
        state.cart().get(ProductId::new(3)).map(|item| item.quantity),
        Some(2)
    );
    assert_eq!(state.cart().total().display(), "$899.97");
    assert_eq!(state.users().len(), 1);
}

#[test]
fn test_malformed_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("furnishme.json");
    fs::write(&path, "definitely not json").unwrap();

    let state = open(&path);

    assert_eq!(state.users().len(), 1);
    assert!(state.cart().is_empty());
    assert!(!state.session().is_logged_in());
    // The seeded directory replaced the garbage.
    assert!(FileStorage::open(&path).unwrap().get(session_keys::USERS).is_some());
}

#[test]
fn test_failed_write_keeps_state_and_skips_subscribers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("furnishme.json");
    let mut state = open(&path);
    login_demo(&mut state);

    let calls = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&calls);
    state.cart_store_mut().subscribe(move |_| *seen.borrow_mut() += 1);

    // A directory in place of the file makes every later write fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let reply = dispatch(&mut state, Event::AddToCart(ProductId::new(1)));

    assert_eq!(messages(&reply), [STORAGE_FAILURE_MESSAGE]);
    assert!(state.cart().is_empty());
    assert!(!reply.rerender.any());
    assert_eq!(*calls.borrow(), 0);
}
