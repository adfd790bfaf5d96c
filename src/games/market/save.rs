//! Progress persistence.
//!
//! The record is stored as one camelCase JSON value under [`STORAGE_KEY`].
//! The layout version lives in the key suffix; fields added later must be
//! optional with a default so older records keep loading.
//!
//! Storage is best effort. Every failure is logged and swallowed, and the
//! in-memory record stays authoritative for the rest of the session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::console;

use super::progress::{market_level_for_xp, AudioSettings, ProgressRecord};

pub const STORAGE_KEY: &str = "market_runner_state_v1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No storage in this environment (private mode, no window).
    Unavailable,
    Read(String),
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Read(e) => write!(f, "read failed: {e}"),
            StorageError::Write(e) => write!(f, "write failed: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value storage with the shape of `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// The browser's `localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Read(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// In-memory store for native builds. Clones share the same map, so a test
/// can keep a handle and inspect what the game wrote.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
    writes: std::rc::Rc<std::cell::Cell<usize>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Successful `set_item` calls so far.
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Read("injected".into()));
        }
        Ok(self.item(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write("injected".into()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `localStorage` in the browser, a throwaway map elsewhere.
pub fn default_backend() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    return Box::new(LocalStorage);

    #[cfg(not(target_arch = "wasm32"))]
    Box::new(MemoryStore::new())
}

// ── Stored layout ──────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
struct ProgressSave {
    coins: u32,
    xp: u32,
    market_level: u32,
    unlocked_levels: Vec<u32>,
    completed_levels: Vec<u32>,
    /// Absent in records written before audio settings existed.
    audio_settings: Option<AudioSave>,
}

impl Default for ProgressSave {
    fn default() -> Self {
        extract_save(&ProgressRecord::default())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
struct AudioSave {
    music: bool,
    sfx: bool,
}

impl Default for AudioSave {
    fn default() -> Self {
        let d = AudioSettings::default();
        Self { music: d.music, sfx: d.sfx }
    }
}

fn extract_save(record: &ProgressRecord) -> ProgressSave {
    ProgressSave {
        coins: record.coins,
        xp: record.xp,
        market_level: record.market_level,
        unlocked_levels: record.unlocked_levels.iter().copied().collect(),
        completed_levels: record.completed_levels.iter().copied().collect(),
        audio_settings: Some(AudioSave {
            music: record.audio.music,
            sfx: record.audio.sfx,
        }),
    }
}

/// Rebuild a record, repairing what older or hand-edited saves get wrong.
fn apply_save(save: ProgressSave) -> ProgressRecord {
    let audio = save.audio_settings.unwrap_or_default();
    let mut record = ProgressRecord {
        coins: save.coins,
        xp: save.xp,
        market_level: save.market_level.max(market_level_for_xp(save.xp)).max(1),
        unlocked_levels: save.unlocked_levels.into_iter().collect(),
        completed_levels: save.completed_levels.into_iter().collect(),
        audio: AudioSettings { music: audio.music, sfx: audio.sfx },
        ..ProgressRecord::default()
    };
    record.unlocked_levels.insert(1);
    record
}

// ── Store ──────────────────────────────────────────────────────

pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    /// JSON of the last successful write, to skip identical saves.
    last_written: Option<String>,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend, last_written: None }
    }

    /// The saved record, or a fresh one if there is none or it is unreadable.
    pub fn load(&mut self) -> ProgressRecord {
        let json = match self.backend.get_item(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return ProgressRecord::default(),
            Err(e) => {
                console::warn(&format!("could not read progress ({e}), starting fresh"));
                return ProgressRecord::default();
            }
        };

        let save: ProgressSave = match serde_json::from_str(&json) {
            Ok(save) => save,
            Err(e) => {
                console::warn(&format!("discarding unreadable progress: {e}"));
                if let Err(e) = self.backend.remove_item(STORAGE_KEY) {
                    console::warn(&format!("could not remove unreadable progress: {e}"));
                }
                return ProgressRecord::default();
            }
        };

        if save.audio_settings.is_none() {
            console::log("migrated progress saved before audio settings");
        }
        self.last_written = Some(json);
        apply_save(save)
    }

    /// Write `record` unless it matches the last write.
    pub fn save(&mut self, record: &ProgressRecord) {
        let json = match serde_json::to_string(&extract_save(record)) {
            Ok(json) => json,
            Err(e) => {
                console::warn(&format!("could not serialize progress: {e}"));
                return;
            }
        };

        if self.last_written.as_deref() == Some(json.as_str()) {
            return;
        }

        match self.backend.set_item(STORAGE_KEY, &json) {
            Ok(()) => self.last_written = Some(json),
            Err(e) => console::warn(&format!("could not save progress: {e}")),
        }
    }

    pub fn wipe(&mut self) {
        self.last_written = None;
        match self.backend.remove_item(STORAGE_KEY) {
            Ok(()) => console::log("progress wiped"),
            Err(e) => console::warn(&format!("could not wipe progress: {e}")),
        }
    }
}
