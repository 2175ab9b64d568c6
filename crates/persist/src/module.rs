use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{ConfigStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the current values of a [`ModuleConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Stored,
    Defaults,
}

/// A typed configuration record bound to a store key.
///
/// Holds the current values and the initial ones `reset` returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfig<T> {
    key: String,
    data: T,
    initial: T,
}

impl<T> ModuleConfig<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(key: impl Into<String>, initial: T) -> Self {
        Self {
            key: key.into(),
            data: initial.clone(),
            initial,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn set(&mut self, data: T) {
        self.data = data;
    }

    /// Read the stored record. A missing, unreadable or corrupt record leaves
    /// the initial values in place.
    pub fn load(&mut self, store: &dyn ConfigStore) -> ConfigSource {
        let text = match store.read(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored config, using defaults");
                self.data = self.initial.clone();
                return ConfigSource::Defaults;
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "config store unreadable, using defaults");
                self.data = self.initial.clone();
                return ConfigSource::Defaults;
            }
        };
        match serde_json::from_str(&text) {
            Ok(data) => {
                self.data = data;
                ConfigSource::Stored
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "corrupt config record, using defaults");
                self.data = self.initial.clone();
                ConfigSource::Defaults
            }
        }
    }

    pub fn save(&self, store: &mut dyn ConfigStore) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(&self.data)?;
        store.write(&self.key, &text)?;
        tracing::debug!(key = %self.key, "config saved");
        Ok(())
    }

    /// Back to the initial values, persisted.
    pub fn reset(&mut self, store: &mut dyn ConfigStore) -> Result<(), ConfigError> {
        self.data = self.initial.clone();
        self.save(store)
    }

    /// Drop the stored record and fall back to the initial values.
    pub fn clear(&mut self, store: &mut dyn ConfigStore) -> Result<bool, ConfigError> {
        self.data = self.initial.clone();
        Ok(store.remove(&self.key)?)
    }
}

impl<T> ModuleConfig<T>
where
    T: Serialize + DeserializeOwned + Clone + Default,
{
    pub fn with_defaults(key: impl Into<String>) -> Self {
        Self::new(key, T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonDirStore, MemoryConfigStore};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tunables {
        speed: f64,
        count: u32,
    }

    impl Default for Tunables {
        fn default() -> Self {
            Self {
                speed: 1.5,
                count: 10,
            }
        }
    }

    #[test]
    fn missing_record_uses_defaults() {
        let store = MemoryConfigStore::new();
        let mut config = ModuleConfig::<Tunables>::with_defaults("tunables");
        assert_eq!(config.load(&store), ConfigSource::Defaults);
        assert_eq!(config.data(), &Tunables::default());
    }

    #[test]
    fn saved_values_load_back() {
        let mut store = MemoryConfigStore::new();
        let mut config = ModuleConfig::<Tunables>::with_defaults("tunables");
        config.set(Tunables {
            speed: 3.0,
            count: 2,
        });
        config.save(&mut store).unwrap();

        let mut fresh = ModuleConfig::<Tunables>::with_defaults("tunables");
        assert_eq!(fresh.load(&store), ConfigSource::Stored);
        assert_eq!(fresh.data().count, 2);
    }

    #[test]
    fn corrupt_record_falls_back() {
        let mut store = MemoryConfigStore::new();
        store.write("tunables", "{ not json").unwrap();
        let mut config = ModuleConfig::<Tunables>::with_defaults("tunables");
        config.set(Tunables {
            speed: 9.0,
            count: 9,
        });
        assert_eq!(config.load(&store), ConfigSource::Defaults);
        assert_eq!(config.data(), &Tunables::default());
    }

    #[test]
    fn reset_persists_initial_values() {
        let mut store = MemoryConfigStore::new();
        let initial = Tunables {
            speed: 0.5,
            count: 1,
        };
        let mut config = ModuleConfig::new("tunables", initial.clone());
        config.set(Tunables::default());
        config.save(&mut store).unwrap();
        config.reset(&mut store).unwrap();
        assert_eq!(config.data(), &initial);

        let mut fresh = ModuleConfig::<Tunables>::with_defaults("tunables");
        fresh.load(&store);
        assert_eq!(fresh.data(), &initial);
    }

    #[test]
    fn clear_removes_record() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        let mut config = ModuleConfig::<Tunables>::with_defaults("tunables");
        config.save(&mut store).unwrap();
        assert!(tmp.path().join("tunables.json").exists());
        assert!(config.clear(&mut store).unwrap());
        assert!(!tmp.path().join("tunables.json").exists());
        assert!(!config.clear(&mut store).unwrap());
    }

    #[test]
    fn invalid_key_surfaces_on_save() {
        let mut store = MemoryConfigStore::new();
        let config = ModuleConfig::<Tunables>::with_defaults("../x");
        assert!(matches!(
            config.save(&mut store),
            Err(ConfigError::Store(StoreError::InvalidKey(_)))
        ));
    }
}
