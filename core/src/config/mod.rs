//! Persisted configuration
//!
//! Settings live in a single TOML document addressed by dotted key paths
//! (`elements.mount_raptor.shown`). [`ConfigStore`] owns the document and its
//! backing file; [`ConfigOption`] is a typed cell bound to one key that loads
//! at construction and writes back through the store on every mutation.

mod option;

pub use option::ConfigOption;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use toml::{Table, Value};

/// Errors that can occur while loading, reading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        source: toml::ser::Error,
    },
    #[error("Failed to encode settings for {path:?}: {source}")]
    Encode {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Stored value for '{key}' has the wrong type: {source}")]
    InvalidValue {
        key: String,
        source: toml::de::Error,
    },
    #[error("Key '{key}' passes through a non-table value")]
    KeyConflict { key: String },
}

/// Keyed TOML document with an optional backing file
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    root: Table,
    path: Option<PathBuf>,
    dirty: bool,
}

impl ConfigStore {
    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file yields an empty store bound to `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let root = match fs::read_to_string(&path) {
            Ok(contents) => {
                toml::from_str::<Table>(&contents).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "No settings file yet, starting empty");
                Table::new()
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Ok(Self {
            root,
            path: Some(path),
            dirty: false,
        })
    }

    /// Parse a store from a TOML string (used for builtin defaults and tests)
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let root = toml::from_str::<Table>(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        Ok(Self {
            root,
            path: None,
            dirty: false,
        })
    }

    /// Default settings location: `<config_dir>/radial/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radial").join("settings.toml"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there are mutations not yet written by [`save`](Self::save)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raw value at `key`, if present
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let last = segments.next_back()?;
        let mut table = &self.root;
        for segment in segments {
            table = table.get(segment)?.as_table()?;
        }
        table.get(last)
    }

    /// Typed value at `key`. `Ok(None)` if absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.get_value(key) else {
            return Ok(None);
        };
        value
            .clone()
            .try_into()
            .map(Some)
            .map_err(|source| ConfigError::InvalidValue {
                key: key.to_string(),
                source,
            })
    }

    /// Store `value` at `key`, creating intermediate tables as needed
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), ConfigError> {
        let value = Value::try_from(value).map_err(|source| ConfigError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let mut segments: Vec<&str> = key.split('.').collect();
        let Some(last) = segments.pop() else {
            return Err(ConfigError::KeyConflict {
                key: key.to_string(),
            });
        };

        let mut table = &mut self.root;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert(Value::Table(Table::new()));
            table = entry.as_table_mut().ok_or_else(|| ConfigError::KeyConflict {
                key: key.to_string(),
            })?;
        }

        if table.get(last) != Some(&value) {
            table.insert(last.to_string(), value);
            self.dirty = true;
        }
        Ok(())
    }

    /// Write to the backing file if there are unsaved changes.
    /// In-memory stores just clear the dirty flag.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(path) = &self.path {
            let contents =
                toml::to_string_pretty(&self.root).map_err(|source| ConfigError::Encode {
                    path: path.clone(),
                    source,
                })?;

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(path, contents).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = ?path, "Saved settings");
        }

        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_get_set() {
        let mut store = ConfigStore::in_memory();
        store.set("elements.raptor.shown", &false).unwrap();
        store.set("elements.raptor.sorting_priority", &3).unwrap();

        assert_eq!(store.get::<bool>("elements.raptor.shown").unwrap(), Some(false));
        assert_eq!(store.get::<i32>("elements.raptor.sorting_priority").unwrap(), Some(3));
        assert_eq!(store.get::<bool>("elements.griffon.shown").unwrap(), None);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut store = ConfigStore::from_toml_str("[wheel]\nscale = 1.5\n").unwrap();
        store.set("wheel.scale", &1.5).unwrap();
        assert!(!store.is_dirty());
        store.set("wheel.scale", &2.0).unwrap();
        assert!(store.is_dirty());
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let store = ConfigStore::from_toml_str("[elements.raptor]\nshown = \"yes\"\n").unwrap();
        let err = store.get::<bool>("elements.raptor.shown").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_key_through_scalar_conflicts() {
        let mut store = ConfigStore::from_toml_str("elements = 5\n").unwrap();
        let err = store.set("elements.raptor.shown", &true).unwrap_err();
        assert!(matches!(err, ConfigError::KeyConflict { .. }));
    }

    #[test]
    fn test_encode_error_names_the_file() {
        let source = toml::to_string(&()).unwrap_err();
        let err = ConfigError::Encode {
            path: PathBuf::from("/tmp/radial/settings.toml"),
            source,
        };
        let message = err.to_string();
        assert!(message.contains("settings.toml"), "{message}");
        assert!(!message.contains("''"), "{message}");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("radial-config-test-{}", std::process::id()));
        let path = dir.join("settings.toml");
        let _ = fs::remove_file(&path);

        let mut store = ConfigStore::load(&path).unwrap();
        assert!(store.get_value("elements").is_none());
        store.set("elements.raptor.keybind", &"Ctrl+1").unwrap();
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(
            reloaded.get::<String>("elements.raptor.keybind").unwrap().as_deref(),
            Some("Ctrl+1")
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
