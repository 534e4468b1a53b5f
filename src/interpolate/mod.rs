//! Variable interpolation for configuration values.
//!
//! String values may reference other values with `${prefix:name}` or
//! `${name}` markers. A [`Lookup`] resolves one variable to its
//! replacement; an [`Interpolator`] owns a prefix-to-lookup table and walks
//! a value substituting every marker, recursing into substituted text and
//! rejecting cyclic references. The [`LookupRegistry`] holds process-wide
//! registrations that new interpolators start from.
//!
//! # Examples
//!
//! ```
//! use confkey::interpolate::{EnvLookup, Interpolator};
//!
//! let mut interpolator = Interpolator::empty();
//! interpolator.register("env", EnvLookup);
//! // "${env:PATH}" now resolves to the PATH environment variable.
//! ```

pub mod engine;
pub mod lookup;

pub use engine::Interpolator;
pub use lookup::{EnvLookup, Lookup, LookupRegistry, MapLookup};
