//! Key segment representation.

/// One component of a hierarchical key.
///
/// A segment is a name plus an optional non-negative index (`name(3)`),
/// and may be flagged as an attribute segment, rendered `[@name]` in the
/// string form of a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySegment {
    name: String,
    index: Option<usize>,
    attribute: bool,
}

impl KeySegment {
    /// Creates a plain, unindexed segment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            attribute: false,
        }
    }

    /// Creates a segment carrying an index.
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
            attribute: false,
        }
    }

    /// Creates an attribute segment.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            attribute: true,
        }
    }

    /// The segment name, without index or attribute decoration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index attached to this segment, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether this segment carries an index.
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Whether this is an attribute segment.
    pub fn is_attribute(&self) -> bool {
        self.attribute
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }
}
