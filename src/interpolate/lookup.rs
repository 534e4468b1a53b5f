//! Variable lookups and the process-wide lookup registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use log::debug;

/// A named resolver mapping a variable name to a replacement string.
///
/// Implementations must be cheap to call; a lookup runs for every variable
/// occurrence during interpolation.
pub trait Lookup: Send + Sync {
    /// Resolves `name`, or returns `None` when the variable is unknown.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Any `Fn(&str) -> Option<String>` closure works as a lookup.
impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Resolves variables from the process environment.
///
/// `${env:HOME}` style references with this lookup registered under the
/// `env` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl Lookup for EnvLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Resolves variables from a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MapLookup {
    entries: HashMap<String, String>,
}

impl MapLookup {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }
}

impl From<HashMap<String, String>> for MapLookup {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Lookup for MapLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

fn global_table() -> &'static Mutex<HashMap<String, Arc<dyn Lookup>>> {
    static TABLE: OnceLock<Mutex<HashMap<String, Arc<dyn Lookup>>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// The process-wide prefix-to-lookup table.
///
/// Registrations made here are copied into every
/// [`Interpolator`](super::Interpolator) constructed afterwards; instances
/// that already exist keep the snapshot they were built with, and
/// instance-local registrations never touch this table.
///
/// The empty string is a legal prefix, distinct from the default lookup an
/// interpolator consults for variables without any prefix.
pub struct LookupRegistry;

impl LookupRegistry {
    /// Registers a lookup for a prefix, replacing any previous registration.
    pub fn register(prefix: impl Into<String>, lookup: Arc<dyn Lookup>) {
        let prefix = prefix.into();
        debug!("registering global lookup for prefix '{}'", prefix);
        if let Ok(mut table) = global_table().lock() {
            table.insert(prefix, lookup);
        }
    }

    /// Removes the registration for a prefix. Returns whether one existed.
    pub fn deregister(prefix: &str) -> bool {
        debug!("deregistering global lookup for prefix '{}'", prefix);
        match global_table().lock() {
            Ok(mut table) => table.remove(prefix).is_some(),
            Err(_) => false,
        }
    }

    /// Resolves a variable through the lookup registered for `prefix`.
    pub fn resolve(prefix: &str, name: &str) -> Option<String> {
        let lookup = match global_table().lock() {
            Ok(table) => table.get(prefix).cloned(),
            Err(_) => None,
        };
        lookup.and_then(|l| l.lookup(name))
    }

    /// A copy of the current table, taken under the registry lock.
    pub fn snapshot() -> HashMap<String, Arc<dyn Lookup>> {
        match global_table().lock() {
            Ok(table) => table.clone(),
            Err(_) => HashMap::new(),
        }
    }
}
