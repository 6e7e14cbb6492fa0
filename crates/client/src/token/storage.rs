// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key/value backends for the token store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

/// String key/value storage. Operations never fail at this interface;
/// backends log and swallow their own I/O errors.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Write several entries as one update.
    fn set_many(&self, entries: &[(&str, &str)]) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Remove several entries as one update.
    fn remove_many(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// JSON-object file storage shared by every process that opens the same
/// path.
///
/// Nothing is cached: reads go to the file and mutations merge into its
/// current contents before the atomic rewrite, so a logout or rotation done
/// by another process is seen on the next access.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to the file's current entries, persisting only when it
    /// reports a modification.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>) -> bool) {
        let _guard = self.write_lock.lock();
        let mut entries = load(&self.path);
        if !change(&mut entries) {
            return;
        }
        if let Err(e) = save(&self.path, &entries) {
            warn!(path = %self.path.display(), "failed to persist tokens: {e}");
        } else {
            debug!(path = %self.path.display(), entries = entries.len(), "persisted tokens");
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        load(&self.path).remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.set_many(&[(key, value)]);
    }

    fn remove(&self, key: &str) {
        self.remove_many(&[key]);
    }

    fn set_many(&self, pairs: &[(&str, &str)]) {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_owned(), (*value).to_owned());
            }
            true
        });
    }

    fn remove_many(&self, keys: &[&str]) {
        self.update(|entries| {
            let before = entries.len();
            entries.retain(|key, _| !keys.contains(&key.as_str()));
            entries.len() != before
        });
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) => {
            trace!(path = %path.display(), "no persisted tokens: {e}");
            return BTreeMap::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), "failed to parse persisted tokens: {e}");
            BTreeMap::new()
        }
    }
}

/// Write the map to `path` atomically (write tmp + rename).
///
/// The temp name carries the PID and a counter so overlapping saves never
/// share a temp file.
fn save(path: &Path, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(entries)?;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(
        "{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        seq,
    );
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
