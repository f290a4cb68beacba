// Browser-local persisted state: the display username and the last prediction confidence.
// Plain key-value pairs, no expiry.

use std::collections::HashMap;

use crate::error::EngineError;

pub const USERNAME_KEY: &str = "cinemood_username";
pub const LAST_CONFIDENCE_KEY: &str = "cinemood_last_confidence";
pub const DEFAULT_USERNAME: &str = "User";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError>;
}

/// In-memory store for tests and environments without `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, EngineError> {
        let window = web_sys::window()
            .ok_or_else(|| EngineError::InvalidConfig("no window".to_string()))?;
        let storage = window
            .local_storage()
            .ok()
            .flatten()
            .ok_or_else(|| EngineError::InvalidConfig("localStorage unavailable".to_string()))?;
        Ok(BrowserStorage { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| EngineError::InvalidConfig(format!("localStorage write failed: {:?}", e)))
    }
}

/// Typed access to the keys the pages share.
#[derive(Debug, Clone, Default)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Preferences { store }
    }

    /// Display name, `User` when never set or blank.
    pub fn username(&self) -> String {
        self.store
            .get(USERNAME_KEY)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }

    pub fn set_username(&mut self, name: &str) -> Result<(), EngineError> {
        self.store.set(USERNAME_KEY, name.trim())
    }

    pub fn last_confidence(&self) -> Option<f64> {
        self.store
            .get(LAST_CONFIDENCE_KEY)
            .and_then(|raw| raw.parse::<f64>().ok())
    }

    pub fn set_last_confidence(&mut self, confidence: f64) -> Result<(), EngineError> {
        self.store
            .set(LAST_CONFIDENCE_KEY, &confidence.to_string())
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_defaults_to_user() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.username(), "User");
    }

    #[test]
    fn username_is_trimmed_and_blank_falls_back() {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.set_username("  ada ").unwrap();
        assert_eq!(prefs.username(), "ada");

        prefs.set_username("   ").unwrap();
        assert_eq!(prefs.username(), "User");
    }

    #[test]
    fn confidence_round_trips_as_text() {
        let mut prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.last_confidence(), None);
        prefs.set_last_confidence(0.82).unwrap();
        assert_eq!(prefs.last_confidence(), Some(0.82));
        assert_eq!(
            prefs.into_inner().get(LAST_CONFIDENCE_KEY).as_deref(),
            Some("0.82")
        );
    }

    #[test]
    fn garbage_confidence_reads_as_none() {
        let mut store = MemoryStore::new();
        store.set(LAST_CONFIDENCE_KEY, "high").unwrap();
        assert_eq!(Preferences::new(store).last_confidence(), None);
    }
}
