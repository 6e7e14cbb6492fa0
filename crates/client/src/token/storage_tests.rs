// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("access_token"), None);

    storage.set("access_token", "A1");
    assert_eq!(storage.get("access_token"), Some("A1".to_owned()));

    storage.set("access_token", "A2");
    assert_eq!(storage.get("access_token"), Some("A2".to_owned()));

    storage.remove("access_token");
    assert_eq!(storage.get("access_token"), None);
}

#[test]
fn file_storage_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("tokens.json");

    let storage = FileStorage::open(&path);
    storage.set("access_token", "A1");
    storage.set("refresh_token", "R1");
    drop(storage);

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get("access_token"), Some("A1".to_owned()));
    assert_eq!(reopened.get("refresh_token"), Some("R1".to_owned()));

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw["access_token"], "A1");
    assert_eq!(raw["refresh_token"], "R1");
    Ok(())
}

#[test]
fn file_storage_remove_is_persisted() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");

    let storage = FileStorage::open(&path);
    storage.set("access_token", "A1");
    storage.remove("access_token");

    assert_eq!(FileStorage::open(&path).get("access_token"), None);
    Ok(())
}

#[test]
fn file_storage_missing_file_is_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::open(dir.path().join("absent.json"));
    assert_eq!(storage.get("access_token"), None);
    assert!(!storage.path().exists());
    Ok(())
}

#[test]
fn file_storage_corrupt_file_is_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "{not json")?;

    let storage = FileStorage::open(&path);
    assert_eq!(storage.get("access_token"), None);

    storage.set("access_token", "A1");
    assert_eq!(FileStorage::open(&path).get("access_token"), Some("A1".to_owned()));
    Ok(())
}

#[test]
fn file_storage_leaves_no_temp_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::open(dir.path().join("tokens.json"));
    for i in 0..5 {
        storage.set("access_token", &format!("A{i}"));
    }
    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["tokens.json".to_owned()]);
    Ok(())
}

#[test]
fn file_storage_handles_see_each_other() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let first = FileStorage::open(&path);
    let second = FileStorage::open(&path);

    first.set_many(&[("access_token", "A1"), ("refresh_token", "R1")]);
    assert_eq!(second.get("access_token"), Some("A1".to_owned()));

    second.remove_many(&["access_token", "refresh_token"]);
    assert_eq!(first.get("access_token"), None);
    assert_eq!(first.get("refresh_token"), None);
    Ok(())
}

#[test]
fn file_storage_merges_into_current_contents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let first = FileStorage::open(&path);
    let second = FileStorage::open(&path);

    first.set("access_token", "A1");
    second.set("theme", "dark");
    first.set("refresh_token", "R1");

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw, serde_json::json!({ "access_token": "A1", "refresh_token": "R1", "theme": "dark" }));
    Ok(())
}

#[test]
fn file_storage_remove_of_absent_key_leaves_file_untouched() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::open(dir.path().join("tokens.json"));
    storage.remove_many(&["access_token", "refresh_token"]);
    assert!(!storage.path().exists());
    Ok(())
}
