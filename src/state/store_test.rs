use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::net::types::Role;

fn ann() -> User {
    User::new("ann@example.com", "Ann", "Lee", Role::User)
}

fn counting_store() -> (Store, Arc<AtomicUsize>) {
    let mut store = Store::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    store.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (store, calls)
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn new_store_starts_logged_out() {
    let store = Store::new();
    assert_eq!(*store.state(), AppState::default());
    assert!(store.actions().is_empty());
}

#[test]
fn log_in_sets_user_and_tokens_together() {
    let mut store = Store::new();
    assert!(store.log_in(ann(), AuthTokens::new("a", "r")));
    let state = store.state();
    assert_eq!(state.logged_user(), Some(&ann()));
    assert_eq!(state.auth_tokens(), Some(&AuthTokens::new("a", "r")));
    assert!(state.is_consistent());
}

#[test]
fn refresh_keeps_refresh_token() {
    let mut store = Store::new();
    store.set_auth_tokens(AuthTokens::new("a", "r"));
    store.refresh_auth_tokens("newAccess");
    assert_eq!(store.state().auth_tokens(), Some(&AuthTokens::new("newAccess", "r")));
}

#[test]
fn clear_user_twice_keeps_same_snapshot() {
    let mut store = Store::new();
    store.set_user(ann());
    assert!(store.clear_user());
    let first = store.state();
    assert!(!store.clear_user());
    assert!(Arc::ptr_eq(&first, &store.state()));
}

#[test]
fn unhandled_action_keeps_snapshot_pointer() {
    let mut store = Store::new();
    store.set_user(ann());
    let before = store.state();
    assert!(!store.refresh_auth_tokens("x"));
    assert!(Arc::ptr_eq(&before, &store.state()));
}

#[test]
fn every_dispatch_is_logged_in_order() {
    let mut store = Store::new();
    store.set_user(ann());
    store.clear_user();
    store.clear_user();
    store.clear_auth_tokens();
    let names: Vec<_> = store.actions().iter().map(Action::name).collect();
    assert_eq!(names, ["@@USER/SET", "@@USER/CLEAR", "@@USER/CLEAR", "@@AUTH_TOKEN/CLEAR"]);
}

#[test]
fn with_state_seeds_snapshot() {
    let mut seeded = Store::new();
    seeded.log_in(ann(), AuthTokens::new("a", "r"));
    let store = Store::with_state((*seeded.state()).clone());
    assert!(store.state().is_logged_in());
    assert!(store.actions().is_empty());
}

// =============================================================
// Subscribers
// =============================================================

#[test]
fn subscribers_notified_only_on_change() {
    let (mut store, calls) = counting_store();
    store.set_user(ann());
    store.set_user(ann());
    store.clear_auth_tokens();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn subscriber_sees_new_state() {
    let mut store = Store::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&seen);
    store.subscribe(move |state| {
        if state.is_logged_in() {
            flag.store(1, Ordering::SeqCst);
        }
    });
    store.log_in(ann(), AuthTokens::new("a", "r"));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut store = Store::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let id = store.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_user(ann());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
