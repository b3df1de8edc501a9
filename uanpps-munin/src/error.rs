//! Error types for descriptor rendering.

use thiserror::Error;

/// Broken static configuration.
///
/// Unlike per-field diagnostics these abort rendering: a partial config block
/// is of no use to Munin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field colour references a palette entry that does not exist.
    #[error("field '{field}' of graph '{graph}' references missing colour '{group}.{key}'")]
    MissingColour {
        graph: String,
        field: String,
        group: String,
        key: String,
    },

    /// Two fields of one graph share an id.
    #[error("graph '{graph}' declares field '{field}' more than once")]
    DuplicateField { graph: String, field: String },
}
