//! confkey - the core machinery of a layered configuration system.
//!
//! Configuration libraries juggle three small string languages: dotted
//! hierarchical keys (`tables.table(0)[@type]`), delimiter-separated value
//! lists with backslash escaping (`red,green,"a\,b"`), and `${...}`
//! variable references inside values. This crate implements those three
//! cores plus an in-memory store that wires them together; format adapters
//! (properties files, XML, databases) are expected to live on top.
//!
//! - [`keypath`] - parse, build and compare hierarchical keys
//! - [`tokenizer`] - split, escape, join and quote raw values
//! - [`interpolate`] - resolve `${prefix:name}` references with pluggable
//!   lookups and cycle detection
//! - [`config`] - an insertion-ordered map configuration using all three
//!
//! # Examples
//!
//! ```
//! use confkey::{KeyPath, MemoryConfig};
//!
//! let mut config = MemoryConfig::new();
//! config.set("tables.table(0).name", "users").unwrap();
//! config.set("tables.table(1).name", "${tables.table(0).name}_audit").unwrap();
//!
//! let key = KeyPath::parse("tables.table(1).name");
//! assert_eq!(key.segments()[1].index(), Some(1));
//! assert_eq!(
//!     config.get("tables.table(1).name").unwrap(),
//!     Some("users_audit".to_string())
//! );
//! ```

pub mod config;
pub mod error;
pub mod interpolate;
pub mod keypath;
pub mod tokenizer;

pub use config::{ConfigLookup, MemoryConfig};
pub use error::{ConfigError, Result};
pub use interpolate::{EnvLookup, Interpolator, Lookup, LookupRegistry, MapLookup};
pub use keypath::{KeyPath, KeySegment};
pub use tokenizer::{escape, join, quote, split, unquote};
