//! Error types shared across the confkey crate.
//!
//! The key parser and the value tokenizer are total functions and never
//! fail; errors here cover interpolation cycles, typed value conversion,
//! and outright API misuse.

use thiserror::Error;

/// Errors produced by configuration operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A `${...}` variable referred back to itself, directly or through
    /// other variables, while it was still being resolved.
    #[error("cyclic reference detected while resolving variable '{variable}'")]
    CyclicReference {
        /// The variable that was encountered twice on the resolution stack.
        variable: String,
    },

    /// A caller passed an argument that violates the API contract.
    #[error("invalid argument: {what}")]
    InvalidArgument {
        /// Description of the violated contract.
        what: &'static str,
    },

    /// A stored value could not be converted to the requested type.
    #[error("cannot convert value '{value}' of key '{key}' to {target}")]
    ValueConversion {
        /// The configuration key whose value was requested.
        key: String,
        /// The (interpolated) value that failed to convert.
        value: String,
        /// Name of the requested target type.
        target: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
