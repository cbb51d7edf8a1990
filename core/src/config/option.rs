use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ConfigError, ConfigStore};

/// A typed value bound to one key of a [`ConfigStore`].
///
/// The value is read once when bound and cached; [`set`](Self::set) updates
/// the cache and writes through to the store. Persisting to disk is the
/// store's [`save`](ConfigStore::save).
#[derive(Debug, Clone)]
pub struct ConfigOption<T> {
    key: String,
    default: T,
    value: T,
}

impl<T> ConfigOption<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned,
{
    /// Bind to `key`, loading the stored value or falling back to `default`.
    ///
    /// A value of the wrong type is logged and replaced by the default rather
    /// than failing element construction.
    pub fn bind(store: &ConfigStore, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match store.get::<T>(&key) {
            Ok(Some(v)) => v,
            Ok(None) => default.clone(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Ignoring invalid stored setting");
                default.clone()
            }
        };
        Self {
            key,
            default,
            value,
        }
    }

    /// Unbound option holding `default`; used before a store is available
    pub fn detached(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            value: default.clone(),
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    /// Update the value and write it through to `store`.
    /// On error the cached value is left unchanged.
    pub fn set(&mut self, store: &mut ConfigStore, value: T) -> Result<(), ConfigError> {
        store.set(&self.key, &value)?;
        self.value = value;
        Ok(())
    }

    /// Restore the default and write it through to `store`
    pub fn reset(&mut self, store: &mut ConfigStore) -> Result<(), ConfigError> {
        let default = self.default.clone();
        self.set(store, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_reads_stored_value() {
        let store = ConfigStore::from_toml_str("[elements.raptor]\nsorting_priority = 7\n").unwrap();
        let opt = ConfigOption::bind(&store, "elements.raptor.sorting_priority", 0);
        assert_eq!(*opt.value(), 7);
        assert!(!opt.is_default());
    }

    #[test]
    fn test_bind_falls_back_on_missing_or_invalid() {
        let store = ConfigStore::from_toml_str("[elements.raptor]\nshown = 12\n").unwrap();
        let shown = ConfigOption::bind(&store, "elements.raptor.shown", true);
        let prio = ConfigOption::bind(&store, "elements.raptor.sorting_priority", 4);
        assert!(*shown.value());
        assert_eq!(*prio.value(), 4);
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = ConfigStore::in_memory();
        let mut opt = ConfigOption::bind(&store, "elements.raptor.shown", true);
        opt.set(&mut store, false).unwrap();
        assert!(!*opt.value());
        assert_eq!(store.get::<bool>("elements.raptor.shown").unwrap(), Some(false));

        opt.reset(&mut store).unwrap();
        assert_eq!(store.get::<bool>("elements.raptor.shown").unwrap(), Some(true));
    }

    #[test]
    fn test_failed_set_keeps_cached_value() {
        let mut store = ConfigStore::from_toml_str("elements = 1\n").unwrap();
        let mut opt = ConfigOption::detached("elements.raptor.shown", true);
        assert!(opt.set(&mut store, false).is_err());
        assert!(*opt.value());
    }
}
