//! The `${...}` substitution engine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::trace;

use super::lookup::{Lookup, LookupRegistry};
use crate::error::{ConfigError, Result};

/// Resolves `${prefix:name}` and `${name}` references inside string values.
///
/// An interpolator is built with a snapshot of the process-wide
/// [`LookupRegistry`]; lookups registered globally after construction, or
/// locally on other instances, do not affect it. Variables without a prefix
/// go to the instance's default lookup, when one is set.
///
/// # Examples
///
/// ```
/// use confkey::interpolate::{Interpolator, MapLookup};
///
/// let mut interpolator = Interpolator::empty();
/// interpolator.register("sys", MapLookup::new().with("home", "/opt/app"));
/// let resolved = interpolator.interpolate("Path: ${sys:home}/bin").unwrap();
/// assert_eq!(resolved, "Path: /opt/app/bin");
/// ```
#[derive(Clone)]
pub struct Interpolator {
    lookups: HashMap<String, Arc<dyn Lookup>>,
    default_lookup: Option<Arc<dyn Lookup>>,
}

impl Interpolator {
    /// Creates an interpolator seeded with the current global registrations.
    pub fn new() -> Self {
        Self {
            lookups: LookupRegistry::snapshot(),
            default_lookup: None,
        }
    }

    /// Creates an interpolator with no registrations at all.
    pub fn empty() -> Self {
        Self {
            lookups: HashMap::new(),
            default_lookup: None,
        }
    }

    /// Registers a lookup for a prefix on this instance only.
    ///
    /// The empty string is a legal prefix (matching `${:name}`), distinct
    /// from the default lookup.
    pub fn register(&mut self, prefix: impl Into<String>, lookup: impl Lookup + 'static) -> &mut Self {
        self.lookups.insert(prefix.into(), Arc::new(lookup));
        self
    }

    /// Removes an instance-local registration. Returns whether one existed.
    pub fn deregister(&mut self, prefix: &str) -> bool {
        self.lookups.remove(prefix).is_some()
    }

    /// Sets the lookup consulted for variables without a prefix.
    pub fn set_default_lookup(&mut self, lookup: impl Lookup + 'static) -> &mut Self {
        self.default_lookup = Some(Arc::new(lookup));
        self
    }

    /// Sets the default lookup from an already-shared handle.
    pub fn set_default_lookup_arc(&mut self, lookup: Arc<dyn Lookup>) -> &mut Self {
        self.default_lookup = Some(lookup);
        self
    }

    /// The prefixes currently registered on this instance.
    pub fn prefixes(&self) -> Vec<String> {
        self.lookups.keys().cloned().collect()
    }

    /// Resolves one variable reference, without scanning for markers.
    ///
    /// A variable containing `:` dispatches on the part before it: a
    /// registered prefix handles the rest of the name, and an unregistered
    /// empty prefix falls back to the default lookup. Without `:` the whole
    /// variable goes to the default lookup. Unknown prefixes and missing
    /// defaults yield `None`, never an error.
    pub fn lookup(&self, variable: &str) -> Option<String> {
        match variable.split_once(':') {
            Some((prefix, name)) => match self.lookups.get(prefix) {
                Some(lookup) => lookup.lookup(name),
                None if prefix.is_empty() => self.default(name),
                None => None,
            },
            None => self.default(variable),
        }
    }

    fn default(&self, name: &str) -> Option<String> {
        self.default_lookup.as_ref().and_then(|l| l.lookup(name))
    }

    /// Replaces every `${...}` reference in `input` with its resolved value.
    ///
    /// Substituted text is interpolated recursively, so a looked-up value
    /// may itself contain further references. Unresolvable references are
    /// left in place verbatim; `$$` collapses to a single literal `$`,
    /// which keeps the following `{...}` out of interpolation. The only
    /// failure is a cyclic reference.
    pub fn interpolate(&self, input: &str) -> Result<String> {
        let mut active = HashSet::new();
        self.resolve(input, &mut active)
    }

    fn resolve(&self, input: &str, active: &mut HashSet<String>) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '$' {
                out.push(ch);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    // Escaped introducer; the brace expression that may
                    // follow is plain text now.
                    chars.next();
                    out.push('$');
                }
                Some('{') => {
                    chars.next();
                    let mut variable = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        variable.push(c);
                    }
                    if !closed {
                        out.push_str("${");
                        out.push_str(&variable);
                        break;
                    }
                    self.substitute(&variable, &mut out, active)?;
                }
                _ => out.push('$'),
            }
        }
        Ok(out)
    }

    fn substitute(
        &self,
        variable: &str,
        out: &mut String,
        active: &mut HashSet<String>,
    ) -> Result<()> {
        if active.contains(variable) {
            return Err(ConfigError::CyclicReference {
                variable: variable.to_string(),
            });
        }
        match self.lookup(variable) {
            Some(value) => {
                trace!("resolved variable '{}'", variable);
                active.insert(variable.to_string());
                let resolved = self.resolve(&value, active)?;
                active.remove(variable);
                out.push_str(&resolved);
            }
            None => {
                trace!("variable '{}' is unresolvable, keeping it verbatim", variable);
                out.push_str("${");
                out.push_str(variable);
                out.push('}');
            }
        }
        Ok(())
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolator")
            .field("prefixes", &self.prefixes())
            .field("has_default", &self.default_lookup.is_some())
            .finish()
    }
}
