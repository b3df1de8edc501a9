//! Per-field problems found while rendering values.

use std::fmt;

/// Something that went wrong with one field during [`render_values`](crate::render_values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The runtime data does not have the shape the descriptor expects.
    ///
    /// Rendering of the remaining fields of the graph was abandoned.
    StructuralMismatch {
        /// Multigraph id.
        graph: String,
        /// Field whose lookup failed.
        field: String,
        /// The parameter, or `#<index>` for positional lookups.
        parameter: String,
        /// Compact JSON of the data that was searched.
        data: String,
    },

    /// The looked-up value is not a finite number.
    ///
    /// Only this field was skipped.
    ValueCoercion {
        /// Multigraph id.
        graph: String,
        /// Field that was skipped.
        field: String,
        /// Compact JSON of the offending value.
        value: String,
    },
}

impl Diagnostic {
    /// Field the diagnostic refers to.
    pub fn field(&self) -> &str {
        match self {
            Diagnostic::StructuralMismatch { field, .. } => field,
            Diagnostic::ValueCoercion { field, .. } => field,
        }
    }

    /// Whether this diagnostic stopped the rest of the graph from rendering.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Diagnostic::StructuralMismatch { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::StructuralMismatch {
                graph,
                field,
                parameter,
                data,
            } => write!(
                f,
                "[{}] parameter '{}' is missing for field '{}': {}",
                graph, parameter, field, data
            ),
            Diagnostic::ValueCoercion {
                graph,
                field,
                value,
            } => write!(f, "[{}] invalid value for field '{}': {}", graph, field, value),
        }
    }
}

/// Receives diagnostics as the renderer produces them.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that logs every diagnostic at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::error!(fatal = diagnostic.is_fatal(), "{}", diagnostic);
    }
}
