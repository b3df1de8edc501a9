//! Fetch mode rendering.

use serde_json::Value;
use uanpps_types::{GraphDescriptor, Lookup, RuntimeData};

use crate::{Diagnostic, DiagnosticSink};

/// Longest data excerpt carried by a structural mismatch diagnostic.
const MAX_DATA_EXCERPT: usize = 256;

/// Render `<field>.value` lines for one graph.
///
/// The output always starts with `multigraph <id>`. Each field is looked up,
/// coerced to a number, multiplied by `ratio` if given and printed with two
/// decimals. A value that is not finite after scaling counts as invalid.
///
/// Failure policy:
/// - a keyed lookup that finds nothing (or a positional lookup past the end
///   of the data) reports [`Diagnostic::StructuralMismatch`] and stops; the
///   remaining fields are not rendered.
/// - a value that is not a number reports [`Diagnostic::ValueCoercion`] and
///   only that field is skipped.
pub fn render_values<S>(
    data: &RuntimeData,
    descriptor: &GraphDescriptor,
    ratio: Option<f64>,
    sink: &mut S,
) -> Vec<String>
where
    S: DiagnosticSink + ?Sized,
{
    let mut lines = Vec::with_capacity(descriptor.fields.len() + 1);
    lines.push(format!("multigraph {}", descriptor.id));

    for (index, field) in descriptor.fields.iter().enumerate() {
        let lookup = field.lookup();
        let Some(raw) = find(data, lookup, index) else {
            sink.report(Diagnostic::StructuralMismatch {
                graph: descriptor.id.clone(),
                field: field.id.clone(),
                parameter: describe(lookup, index),
                data: excerpt(data),
            });
            break;
        };

        // Scaling can overflow a finite reading.
        let scaled = coerce_value(raw)
            .map(|value| match ratio {
                Some(ratio) => value * ratio,
                None => value,
            })
            .filter(|value| value.is_finite());
        let Some(value) = scaled else {
            sink.report(Diagnostic::ValueCoercion {
                graph: descriptor.id.clone(),
                field: field.id.clone(),
                value: raw.to_string(),
            });
            continue;
        };

        lines.push(format!("{}.value {:.2}", field.id, value));
    }

    lines
}

/// Convert a raw reading to a finite number.
///
/// Numbers pass through. Text has decimal commas turned into points and
/// surrounding whitespace removed before parsing. Everything else, and
/// anything that parses to NaN or infinity, is rejected.
pub fn coerce_value(raw: &Value) -> Option<f64> {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.replace(',', ".").trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn find<'a>(data: &'a Value, lookup: Lookup<'_>, index: usize) -> Option<&'a Value> {
    match lookup {
        Lookup::Nested { group, key } => data.as_object()?.get(group)?.as_object()?.get(key),
        Lookup::Key(key) => data.as_object()?.get(key),
        Lookup::Position => match data {
            Value::Array(items) => items.get(index),
            scalar => Some(scalar),
        },
    }
}

fn describe(lookup: Lookup<'_>, index: usize) -> String {
    match lookup {
        Lookup::Nested { group, key } => format!("{}.{}", group, key),
        Lookup::Key(key) => key.to_string(),
        Lookup::Position => format!("#{}", index),
    }
}

fn excerpt(data: &Value) -> String {
    let mut text = data.to_string();
    if text.len() > MAX_DATA_EXCERPT {
        let mut cut = MAX_DATA_EXCERPT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
