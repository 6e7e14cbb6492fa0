// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::token::{FileStorage, KeyValueStore, MemoryStorage};

#[test]
fn save_makes_both_tokens_readable_and_announces_login() {
    let store = TokenStore::in_memory();
    let mut rx = store.subscribe();

    store.save("A1", "R1");

    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    assert!(store.is_logged_in());
    assert_eq!(
        store.tokens(),
        Some(TokenPair { access_token: "A1".into(), refresh_token: "R1".into() })
    );
    assert_eq!(rx.try_recv().ok(), Some(AuthTokenChanged { has_token: true }));
}

#[test]
fn clear_removes_both_tokens_and_announces_logout() {
    let store = TokenStore::in_memory();
    store.save("A1", "R1");
    let mut rx = store.subscribe();

    store.clear();

    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
    assert!(!store.is_logged_in());
    assert_eq!(store.tokens(), None);
    assert_eq!(rx.try_recv().ok(), Some(AuthTokenChanged { has_token: false }));
}

#[test]
fn save_overwrites_unconditionally() {
    let store = TokenStore::in_memory();
    store.save("A1", "R1");
    store.save("A2", "R2");
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().as_deref(), Some("R2"));
}

#[test]
fn never_set_reads_as_absent() {
    let store = TokenStore::in_memory();
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
    assert!(!store.is_logged_in());
}

#[test]
fn every_save_and_clear_is_broadcast_in_order() {
    let store = TokenStore::in_memory();
    let mut rx = store.subscribe();

    store.save("A1", "R1");
    store.save("A2", "R2");
    store.clear();

    let seen: Vec<bool> = std::iter::from_fn(|| rx.try_recv().ok()).map(|e| e.has_token).collect();
    assert_eq!(seen, vec![true, true, false]);
}

#[test]
fn save_without_listeners_is_fine() {
    let store = TokenStore::in_memory();
    store.save("A1", "R1");
    store.clear();
    assert!(!store.is_logged_in());
}

#[test]
fn file_backed_store_restores_session() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");

    TokenStore::new(FileStorage::open(&path)).save("A1", "R1");

    let restored = TokenStore::new(FileStorage::open(&path));
    assert_eq!(restored.access_token().as_deref(), Some("A1"));
    assert_eq!(restored.refresh_token().as_deref(), Some("R1"));
    Ok(())
}

/// Records each storage call so tests can see how writes are grouped.
#[derive(Default)]
struct RecordingStorage {
    inner: MemoryStorage,
    calls: parking_lot::Mutex<Vec<String>>,
}

impl KeyValueStore for std::sync::Arc<RecordingStorage> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }
    fn set(&self, key: &str, value: &str) {
        self.calls.lock().push(format!("set {key}"));
        self.inner.set(key, value);
    }
    fn remove(&self, key: &str) {
        self.calls.lock().push(format!("remove {key}"));
        self.inner.remove(key);
    }
    fn set_many(&self, entries: &[(&str, &str)]) {
        self.calls.lock().push(format!("set_many {}", entries.len()));
        for (key, value) in entries {
            self.inner.set(key, value);
        }
    }
    fn remove_many(&self, keys: &[&str]) {
        self.calls.lock().push(format!("remove_many {}", keys.len()));
        for key in keys {
            self.inner.remove(key);
        }
    }
}

#[test]
fn save_and_clear_write_the_pair_in_one_update() {
    let storage = std::sync::Arc::new(RecordingStorage::default());
    let store = TokenStore::new(std::sync::Arc::clone(&storage));

    store.save("A1", "R1");
    store.clear();

    assert_eq!(*storage.calls.lock(), vec!["set_many 2".to_owned(), "remove_many 2".to_owned()]);
}

#[test]
fn file_backed_stores_share_logout_and_rotation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let watcher = TokenStore::new(FileStorage::open(&path));
    let other = TokenStore::new(FileStorage::open(&path));

    watcher.save("A1", "R1");
    other.save("A2", "R2");
    assert_eq!(watcher.tokens(), other.tokens());
    assert_eq!(watcher.refresh_token().as_deref(), Some("R2"));

    other.clear();
    assert!(!watcher.is_logged_in());
    assert_eq!(watcher.refresh_token(), None);
    Ok(())
}
