//! Integration tests for the session store: creation, active pointer,
//! append-only history, unknown-id tolerance.

use devbot_client::messages::Message;
use devbot_client::session::SessionStore;

#[test]
fn new_store_has_no_active_session() {
    let store = SessionStore::new();
    assert!(store.active_session().is_none());
    assert!(store.sessions().is_empty());
}

#[test]
fn create_session_twice_keeps_both_and_activates_the_second() {
    let mut store = SessionStore::new();
    let first = store.create_session();
    store.append_message(&first, Message::user("hello"));
    let second = store.create_session();

    assert_ne!(first, second);
    assert_eq!(store.sessions().len(), 2);
    assert_eq!(store.active_id(), Some(second.as_str()));
    assert_eq!(store.session(&first).map(|s| s.messages.len()), Some(1));
    assert_eq!(store.active_session().map(|s| s.messages.len()), Some(0));
}

#[test]
fn append_preserves_order() {
    let mut store = SessionStore::new();
    let id = store.create_session();
    store.append_message(&id, Message::user("one"));
    store.append_message(&id, Message::assistant("two"));
    store.append_message(&id, Message::user("three"));
    let contents: Vec<&str> = store
        .session(&id)
        .expect("session exists")
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, ["one", "two", "three"]);
}

#[test]
fn append_to_unknown_session_is_a_noop() {
    let mut store = SessionStore::new();
    let id = store.create_session();
    store.append_message("no-such-id", Message::user("lost"));
    assert!(store.session(&id).expect("session exists").messages.is_empty());
    assert_eq!(store.sessions().len(), 1);
}

#[test]
fn set_active_rejects_unknown_ids() {
    let mut store = SessionStore::new();
    let id = store.create_session();
    assert!(store.set_active("no-such-id").is_err());
    assert_eq!(store.active_id(), Some(id.as_str()));
}

#[test]
fn set_active_switches_back() {
    let mut store = SessionStore::new();
    let first = store.create_session();
    let _second = store.create_session();
    store.set_active(&first).expect("known id");
    assert_eq!(store.active_id(), Some(first.as_str()));
}

#[test]
fn preview_shows_first_message_excerpt() {
    let mut store = SessionStore::new();
    let id = store.create_session();
    assert_eq!(store.session(&id).expect("session exists").preview(), "New Chat");

    store.append_message(
        &id,
        Message::user("a rather long first question that goes on and on"),
    );
    let preview = store.session(&id).expect("session exists").preview();
    assert!(preview.starts_with("a rather long first question"));
    assert!(preview.ends_with("..."));
}
