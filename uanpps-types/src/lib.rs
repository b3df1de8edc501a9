//! # uanpps-types
//!
//! Core types for the uanpps Munin nodes. A node describes each of its graphs
//! with a static [`GraphDescriptor`] (usually loaded from JSON), resolves field
//! colours through a shared [`ColorPalette`], and feeds a fresh
//! [`RuntimeData`] value to the renderer on every invocation.
//!
//! ## Example
//!
//! ```rust
//! use uanpps_types::{ColorPalette, FieldDescriptor, GraphDescriptor, Lookup};
//!
//! let descriptor = GraphDescriptor::builder("khnpp_air_temperature")
//!     .title("Air temperature")
//!     .category("khnpp")
//!     .vlabel("°C")
//!     .field(FieldDescriptor::new("temperature", "Temperature").with_colour("material.red"))
//!     .build();
//!
//! assert_eq!(descriptor.fields.len(), 1);
//! assert_eq!(descriptor.fields[0].lookup(), Lookup::Position);
//!
//! let mut palette = ColorPalette::new();
//! palette.insert("material", "red", "#f44336");
//! assert_eq!(palette.get("material", "red"), Some("#f44336"));
//! ```

mod descriptor;
mod palette;

pub use descriptor::*;
pub use palette::*;

/// Raw readings handed to the value renderer for a single rendering pass.
///
/// A mapping (optionally nested one level for dotted parameters), an ordered
/// sequence for positional lookup, or a bare scalar for single-field graphs.
pub type RuntimeData = serde_json::Value;
