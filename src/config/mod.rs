//! In-memory configuration store.
//!
//! [`MemoryConfig`] is the reference consumer of the key, tokenizer and
//! interpolation cores: values set as raw strings are split on the list
//! delimiter, stored in insertion order, and interpolated on the way back
//! out. Values may reference sibling keys with `${key}` markers.
//!
//! # Examples
//!
//! ```
//! use confkey::config::MemoryConfig;
//!
//! let mut config = MemoryConfig::new();
//! config.set("base", "/opt/app").unwrap();
//! config.set("bin", "${base}/bin").unwrap();
//! config.set("colors", "red,green,blue").unwrap();
//!
//! assert_eq!(config.get("bin").unwrap(), Some("/opt/app/bin".to_string()));
//! assert_eq!(config.get_all("colors").unwrap().len(), 3);
//! ```

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use log::debug;

use crate::error::{ConfigError, Result};
use crate::interpolate::{Interpolator, Lookup};
use crate::keypath::KeyPath;
use crate::tokenizer::{self, DEFAULT_LIST_DELIMITER};

type Store = Arc<RwLock<IndexMap<String, Vec<String>>>>;

/// An insertion-ordered, interpolating configuration store.
#[derive(Debug)]
pub struct MemoryConfig {
    store: Store,
    interpolator: Interpolator,
    list_delimiter: char,
}

impl MemoryConfig {
    /// Creates an empty store with the default `,` list delimiter.
    ///
    /// The interpolator starts from the current global lookup registrations
    /// and resolves unprefixed variables against this store's own keys.
    pub fn new() -> Self {
        Self::with_list_delimiter(DEFAULT_LIST_DELIMITER)
    }

    /// Creates an empty store with a custom list delimiter.
    pub fn with_list_delimiter(list_delimiter: char) -> Self {
        let store: Store = Arc::new(RwLock::new(IndexMap::new()));
        let mut interpolator = Interpolator::new();
        interpolator.set_default_lookup_arc(Arc::new(ConfigLookup {
            store: store.clone(),
        }));
        Self {
            store,
            interpolator,
            list_delimiter,
        }
    }

    /// The delimiter used to split raw values into lists.
    pub fn list_delimiter(&self) -> char {
        self.list_delimiter
    }

    /// Replaces the values of `key` with the list parsed from `value`.
    ///
    /// The raw string is split on the list delimiter with the usual escape
    /// rules, so `a\,b` stores the single value `a,b`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let values = tokenizer::split(value, self.list_delimiter);
        self.write(key, values, true)
    }

    /// Appends the list parsed from `value` to the values of `key`.
    pub fn add(&mut self, key: &str, value: &str) -> Result<()> {
        let values = tokenizer::split(value, self.list_delimiter);
        self.write(key, values, false)
    }

    fn write(&mut self, key: &str, values: Vec<String>, replace: bool) -> Result<()> {
        if key.is_empty() {
            return Err(ConfigError::InvalidArgument {
                what: "configuration key must not be empty",
            });
        }
        debug!("storing {} value(s) under key '{}'", values.len(), key);
        let mut guard = self.store.write().unwrap_or_else(|e| e.into_inner());
        let slot = guard.entry(key.to_string()).or_default();
        if replace {
            slot.clear();
        }
        slot.extend(values);
        Ok(())
    }

    /// The first raw value of `key`, without interpolation.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).and_then(|values| values.first().cloned())
    }

    /// All raw values of `key`, without interpolation.
    pub fn get_raw_all(&self, key: &str) -> Vec<String> {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned().unwrap_or_default()
    }

    /// The first value of `key`, interpolated.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.get_raw(key) {
            Some(raw) => self.interpolator.interpolate(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// All values of `key`, interpolated.
    pub fn get_all(&self, key: &str) -> Result<Vec<String>> {
        self.get_raw_all(key)
            .iter()
            .map(|raw| self.interpolator.interpolate(raw))
            .collect()
    }

    /// The first value of `key` as a boolean.
    ///
    /// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, case
    /// insensitively.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let value = match self.get(key)? {
            Some(v) => v,
            None => return Ok(None),
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" => Ok(Some(false)),
            _ => Err(conversion_error(key, &value, "bool")),
        }
    }

    /// The first value of `key` as a signed integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        let value = match self.get(key)? {
            Some(v) => v,
            None => return Ok(None),
        };
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| conversion_error(key, &value, "i64"))
    }

    /// The first value of `key` as a float.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>> {
        let value = match self.get(key)? {
            Some(v) => v,
            None => return Ok(None),
        };
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| conversion_error(key, &value, "f64"))
    }

    /// Whether `key` has any stored values.
    pub fn contains(&self, key: &str) -> bool {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.contains_key(key)
    }

    /// Removes `key`. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let mut guard = self.store.write().unwrap_or_else(|e| e.into_inner());
        guard.shift_remove(key).is_some()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        let mut guard = self.store.write().unwrap_or_else(|e| e.into_inner());
        guard.clear();
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.len()
    }

    /// Whether the store has no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.keys().cloned().collect()
    }

    /// Extracts the keys below `prefix` into a new store.
    ///
    /// A key belongs to the subset when its parsed [`KeyPath`] starts with
    /// all of `prefix`'s segments and extends past them; it is stored under
    /// the remaining suffix. Raw values are copied as-is, so references to
    /// keys outside the subset become unresolvable there.
    pub fn subset(&self, prefix: &KeyPath) -> MemoryConfig {
        let sub = MemoryConfig::with_list_delimiter(self.list_delimiter);
        {
            let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
            let mut sub_guard = sub.store.write().unwrap_or_else(|e| e.into_inner());
            for (key, values) in guard.iter() {
                let path = KeyPath::parse_with_delimiter(key, prefix.delimiter());
                if path.len() <= prefix.len() || prefix.common_key(&path) != *prefix {
                    continue;
                }
                let suffix = prefix.difference_key(&path);
                sub_guard.insert(suffix.to_string(), values.clone());
            }
        }
        sub
    }

    /// A lookup over this store's raw values.
    ///
    /// Register it on another interpolator (or configuration) to let that
    /// instance resolve `${...}` references against this store.
    pub fn lookup(&self) -> ConfigLookup {
        ConfigLookup {
            store: self.store.clone(),
        }
    }

    /// The interpolator used when reading values.
    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    /// Mutable access to the interpolator, e.g. to register prefixes.
    pub fn interpolator_mut(&mut self) -> &mut Interpolator {
        &mut self.interpolator
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Lookup`] resolving variables to a configuration's raw first values.
#[derive(Clone)]
pub struct ConfigLookup {
    store: Store,
}

impl Lookup for ConfigLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        guard.get(name).and_then(|values| values.first().cloned())
    }
}

fn conversion_error(key: &str, value: &str, target: &'static str) -> ConfigError {
    ConfigError::ValueConversion {
        key: key.to_string(),
        value: value.to_string(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_splits_on_list_delimiter() {
        let mut config = MemoryConfig::new();
        config.set("colors", "red,green,blue").unwrap();
        assert_eq!(config.get_raw_all("colors"), vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_escaped_delimiter_stays_single_value() {
        let mut config = MemoryConfig::new();
        config.set("title", r"Hello\, world").unwrap();
        assert_eq!(config.get_raw_all("title"), vec!["Hello, world"]);
    }

    #[test]
    fn test_add_appends() {
        let mut config = MemoryConfig::new();
        config.set("hosts", "alpha").unwrap();
        config.add("hosts", "beta,gamma").unwrap();
        assert_eq!(config.get_raw_all("hosts"), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut config = MemoryConfig::new();
        let err = config.set("", "value").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));
    }

    #[test]
    fn test_self_referential_interpolation() {
        let mut config = MemoryConfig::new();
        config.set("base", "/opt/app").unwrap();
        config.set("bin", "${base}/bin").unwrap();
        assert_eq!(config.get("bin").unwrap(), Some("/opt/app/bin".to_string()));
    }

    #[test]
    fn test_keys_insertion_order() {
        let mut config = MemoryConfig::new();
        config.set("z", "1").unwrap();
        config.set("a", "2").unwrap();
        config.set("m", "3").unwrap();
        assert_eq!(config.keys(), vec!["z", "a", "m"]);
    }
}
