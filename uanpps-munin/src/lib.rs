//! # uanpps-munin
//!
//! Renders the Munin plugin protocol from static graph descriptors.
//!
//! A node prints two kinds of output:
//!
//! - **config mode**: [`render_descriptor`] emits the `multigraph`/`graph_*`
//!   header of one graph and [`render_fields`] emits the per-field `label`,
//!   `colour` and `info` lines. Callers append their own directives
//!   (`graph_args`, `.draw`, `.min`) between and after these.
//! - **fetch mode**: [`render_values`] looks up each field in the runtime data,
//!   normalises and scales it, and emits `<field>.value X.XX` lines.
//!
//! Problems with individual fields are reported through a [`DiagnosticSink`]
//! instead of a global logger, so the renderer can be tested on its own.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use uanpps_munin::{render_descriptor, render_fields, render_values, Diagnostic};
//! use uanpps_types::{ColorPalette, FieldDescriptor, GraphDescriptor};
//!
//! let graph = GraphDescriptor::builder("rnpp_atm")
//!     .title("Atmospheric pressure")
//!     .category("rnpp")
//!     .vlabel("mmHg")
//!     .field(FieldDescriptor::new("pressure", "Pressure").with_parameter("p"))
//!     .build();
//! let palette = ColorPalette::new();
//!
//! let mut config = render_descriptor(&graph);
//! config.extend(render_fields(&graph, &palette).unwrap());
//! assert_eq!(config[0], "multigraph rnpp_atm");
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let values = render_values(&json!({"p": "1013,2"}), &graph, Some(0.75), &mut diagnostics);
//! assert_eq!(values, vec!["multigraph rnpp_atm", "pressure.value 759.90"]);
//! assert!(diagnostics.is_empty());
//! ```

mod config;
mod diagnostic;
mod error;
mod output;
mod values;

pub use config::{render_descriptor, render_fields, resolve_colour};
pub use diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::ConfigError;
pub use output::Output;
pub use values::{coerce_value, render_values};

// Re-export types for convenience
pub use uanpps_types::{ColorPalette, FieldDescriptor, GraphDescriptor, RuntimeData};
