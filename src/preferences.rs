//! Persisted player preference
//!
//! A single value survives between sessions: the index of the selected
//! character, stored under `selectedCharacter`. LocalStorage on the web,
//! one small file per key natively.

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};

use crate::sim::state::Character;

/// Minimal string key/value store (LocalStorage-shaped)
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory storage (tests, headless runs without a profile)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage: each key is a file holding its value
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> io::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| io::Error::other("LocalStorage unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| io::Error::other("LocalStorage read failed"))
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| io::Error::other("LocalStorage write failed"))
    }
}

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Index into `Character::ALL`
    pub selected_character: usize,
}

impl Preferences {
    /// Storage key
    const STORAGE_KEY: &'static str = "selectedCharacter";

    /// Load from storage; anything missing or unreadable falls back to index 0
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        let raw = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No saved character, using default");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read preferences: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<usize>(raw.trim()) {
            Ok(index) if Character::from_index(index).is_some() => {
                log::info!("Loaded saved character index {}", index);
                Self {
                    selected_character: index,
                }
            }
            _ => {
                log::warn!("Ignoring invalid saved character {:?}", raw);
                Self::default()
            }
        }
    }

    /// Write to storage; failures are logged, not returned
    pub fn save(&self, storage: &mut impl KeyValueStorage) {
        let value = match serde_json::to_string(&self.selected_character) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not encode preferences: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &value) {
            Ok(()) => log::info!("Preferences saved"),
            Err(e) => log::warn!("Could not save preferences: {}", e),
        }
    }

    pub fn character(&self) -> Character {
        Character::from_index(self.selected_character).unwrap_or_default()
    }

    pub fn set_character(&mut self, character: Character) {
        self.selected_character = character.index();
    }

    /// Record a confirmed selection and write it through
    pub fn confirm(&mut self, character: Character, storage: &mut impl KeyValueStorage) {
        self.set_character(character);
        self.save(storage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Storage whose every operation fails
    struct Broken;

    impl KeyValueStorage for Broken {
        fn get_item(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::other("disk on fire"))
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_missing_defaults_to_first_character() {
        let prefs = Preferences::load(&MemoryStorage::default());
        assert_eq!(prefs.selected_character, 0);
        assert_eq!(prefs.character(), Character::MaskDude);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::default();
        let mut prefs = Preferences::default();
        prefs.set_character(Character::PinkMan);
        prefs.save(&mut storage);

        assert_eq!(
            storage.get_item("selectedCharacter").unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(Preferences::load(&storage).character(), Character::PinkMan);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut storage = MemoryStorage::default();
        for bad in ["NaN", "-1", "9", ""] {
            storage.set_item("selectedCharacter", bad).unwrap();
            assert_eq!(Preferences::load(&storage), Preferences::default(), "{bad}");
        }
    }

    #[test]
    fn test_confirm_persists() {
        let mut storage = MemoryStorage::default();
        let mut prefs = Preferences::default();
        prefs.confirm(Character::VirtualGuy, &mut storage);
        assert_eq!(prefs.character(), Character::VirtualGuy);
        assert_eq!(
            storage.get_item("selectedCharacter").unwrap().as_deref(),
            Some("3")
        );
    }

    #[test]
    fn test_broken_storage_is_not_fatal() {
        let prefs = Preferences::load(&Broken);
        assert_eq!(prefs, Preferences::default());
        prefs.save(&mut Broken);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage() {
        let dir = std::env::temp_dir().join(format!("spike-dodge-prefs-{}", std::process::id()));
        let mut storage = FileStorage::new(&dir);
        assert_eq!(storage.get_item("selectedCharacter").unwrap(), None);

        let prefs = Preferences {
            selected_character: 3,
        };
        prefs.save(&mut storage);
        assert_eq!(Preferences::load(&storage).character(), Character::VirtualGuy);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
