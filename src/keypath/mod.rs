//! Hierarchical key-path language for configuration properties.
//!
//! A [`KeyPath`] models a dotted property key such as
//! `tables.table(0).fields.field(1)[@dataType]` as a sequence of
//! [`KeySegment`]s separated by a configurable delimiter (default `.`).
//!
//! # Supported Syntax
//!
//! - `name` - plain segment
//! - `name(n)` - segment with a non-negative index
//! - `[@name]` - attribute segment (always structural, never indexed)
//! - `..` - a doubled delimiter stands for a literal delimiter character
//!   inside a segment name
//!
//! # Examples
//!
//! ```
//! use confkey::keypath::KeyPath;
//!
//! let key = KeyPath::parse("tables.table(0).name");
//! assert_eq!(key.len(), 3);
//! assert_eq!(key.segments()[1].name(), "table");
//! assert_eq!(key.segments()[1].index(), Some(0));
//!
//! let mut built = KeyPath::new();
//! built.append("tables").append("table").append_index(0).append("name");
//! assert_eq!(built, key);
//! ```

pub mod parser;
pub mod segment;

pub use parser::Parser;
pub use segment::KeySegment;

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The delimiter used when none is specified.
pub const DEFAULT_DELIMITER: char = '.';

/// A hierarchical property key.
///
/// Keys compare equal when their canonical string forms are equal; the
/// canonical form doubles literal delimiter characters, renders indices as
/// `(n)` and attribute segments as `[@name]`.
#[derive(Debug, Clone)]
pub struct KeyPath {
    segments: Vec<KeySegment>,
    delimiter: char,
}

impl KeyPath {
    /// Creates an empty key with the default `.` delimiter.
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Creates an empty key with a custom delimiter.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            segments: Vec::new(),
            delimiter,
        }
    }

    /// Parses a raw key string using the default `.` delimiter.
    ///
    /// Parsing never fails; malformed constructs degrade to literal text.
    pub fn parse(input: &str) -> Self {
        Self::parse_with_delimiter(input, DEFAULT_DELIMITER)
    }

    /// Parses a raw key string using a custom delimiter.
    pub fn parse_with_delimiter(input: &str, delimiter: char) -> Self {
        Self {
            segments: Parser::parse(input, delimiter),
            delimiter,
        }
    }

    /// The delimiter separating segments in the string form.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Appends a plain segment.
    pub fn append(&mut self, name: impl Into<String>) -> &mut Self {
        self.segments.push(KeySegment::new(name));
        self
    }

    /// Attaches an index to the last segment.
    ///
    /// Has no effect on an empty key or when the last segment is an
    /// attribute segment, since attributes cannot carry indices.
    pub fn append_index(&mut self, index: usize) -> &mut Self {
        if let Some(last) = self.segments.last_mut() {
            if !last.is_attribute() {
                last.set_index(index);
            }
        }
        self
    }

    /// Appends an attribute segment.
    ///
    /// On a non-empty key this starts a new, final segment; on an empty key
    /// the attribute becomes the sole segment.
    pub fn append_attribute(&mut self, name: impl Into<String>) -> &mut Self {
        self.segments.push(KeySegment::attribute(name));
        self
    }

    /// Shortens the key to at most `len` segments.
    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.segments.truncate(len);
        self
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the key has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// Iterates over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeySegment> {
        self.segments.iter()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&KeySegment> {
        self.segments.last()
    }

    /// Returns the longest shared prefix of this key and `other`.
    ///
    /// Segments match only when their names, indices and attribute flags all
    /// agree; comparison stops at the first mismatch or when either key runs
    /// out of segments. The result is empty when the keys share no leading
    /// segment.
    pub fn common_key(&self, other: &KeyPath) -> KeyPath {
        let segments = self
            .iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect();
        KeyPath {
            segments,
            delimiter: self.delimiter,
        }
    }

    /// Returns the suffix of `other` left after removing its common prefix
    /// with this key.
    ///
    /// When the keys are equal the result is empty; when they share nothing
    /// the result is all of `other`.
    pub fn difference_key(&self, other: &KeyPath) -> KeyPath {
        let shared = self
            .iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .count();
        KeyPath {
            segments: other.segments[shared..].to_vec(),
            delimiter: other.delimiter,
        }
    }
}

impl Default for KeyPath {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_attribute() {
                write!(f, "[@{}]", segment.name())?;
                continue;
            }
            if i > 0 {
                write!(f, "{}", self.delimiter)?;
            }
            for ch in segment.name().chars() {
                if ch == self.delimiter {
                    write!(f, "{}{}", ch, ch)?;
                } else {
                    write!(f, "{}", ch)?;
                }
            }
            if let Some(index) = segment.index() {
                write!(f, "({})", index)?;
            }
        }
        Ok(())
    }
}

impl PartialEq for KeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for KeyPath {}

impl Hash for KeyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq<str> for KeyPath {
    fn eq(&self, other: &str) -> bool {
        *self == KeyPath::parse_with_delimiter(other, self.delimiter)
    }
}

impl PartialEq<&str> for KeyPath {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl From<&str> for KeyPath {
    fn from(input: &str) -> Self {
        KeyPath::parse(input)
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a KeySegment;
    type IntoIter = std::slice::Iter<'a, KeySegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(KeyPath::parse(&raw))
    }
}
