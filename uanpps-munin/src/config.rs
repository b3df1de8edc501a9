//! Config mode rendering.

use uanpps_types::{ColorPalette, ColourRef, GraphDescriptor};

use crate::ConfigError;

/// Render the multigraph header of a graph.
///
/// Always five lines, six when the descriptor has a `total`:
/// `multigraph`, `graph_title`, `graph_category`, `graph_vlabel`,
/// optional `graph_total`, `graph_scale`.
pub fn render_descriptor(descriptor: &GraphDescriptor) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    lines.push(format!("multigraph {}", descriptor.id));
    lines.push(format!("graph_title {}", descriptor.title));
    lines.push(format!("graph_category {}", descriptor.category));
    lines.push(format!("graph_vlabel {}", descriptor.vlabel));
    if let Some(total) = descriptor.total.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("graph_total {}", total));
    }
    lines.push(format!("graph_scale {}", descriptor.scale));
    lines
}

/// Render `label`, `colour` and `info` lines for every field, in order.
pub fn render_fields(
    descriptor: &GraphDescriptor,
    palette: &ColorPalette,
) -> Result<Vec<String>, ConfigError> {
    if let Some(field) = descriptor.duplicate_field_id() {
        return Err(ConfigError::DuplicateField {
            graph: descriptor.id.clone(),
            field: field.to_string(),
        });
    }

    let mut lines = Vec::with_capacity(descriptor.fields.len() * 3);
    for field in &descriptor.fields {
        lines.push(format!("{}.label {}", field.id, field.label));

        if let Some(colour) = field.colour.as_deref() {
            let resolved = resolve_colour(palette, colour).map_err(|e| match e {
                ConfigError::MissingColour { group, key, .. } => ConfigError::MissingColour {
                    graph: descriptor.id.clone(),
                    field: field.id.clone(),
                    group,
                    key,
                },
                other => other,
            })?;
            lines.push(format!("{}.colour {}", field.id, resolved));
        }

        if let Some(info) = field.info.as_deref() {
            lines.push(format!("{}.info {}", field.id, info));
        }
    }
    Ok(lines)
}

/// Resolve a descriptor colour to the value printed after `.colour`.
///
/// `"group.key"` is looked up in the palette and any leading `#` is removed;
/// anything else is returned as is.
pub fn resolve_colour(palette: &ColorPalette, colour: &str) -> Result<String, ConfigError> {
    match ColourRef::parse(colour) {
        ColourRef::Palette { group, key } => palette
            .get(group, key)
            .map(|c| c.trim_start_matches('#').to_string())
            .ok_or_else(|| ConfigError::MissingColour {
                graph: String::new(),
                field: String::new(),
                group: group.to_string(),
                key: key.to_string(),
            }),
        ColourRef::Literal(literal) => Ok(literal.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uanpps_types::FieldDescriptor;

    fn palette() -> ColorPalette {
        let mut palette = ColorPalette::new();
        palette.insert("material", "red", "#abcdef");
        palette.insert("material", "plain", "123456");
        palette
    }

    fn graph() -> GraphDescriptor {
        GraphDescriptor::builder("khnpp_air_temperature")
            .title("Air temperature")
            .category("khnpp")
            .vlabel("C")
            .scale("no")
            .field(
                FieldDescriptor::new("temperature", "Temperature")
                    .with_colour("material.red")
                    .with_info("Outdoor air temperature"),
            )
            .field(FieldDescriptor::new("dew", "Dew point").with_colour("red"))
            .field(FieldDescriptor::new("bare", "Bare"))
            .build()
    }

    #[test]
    fn test_header_without_total() {
        let lines = render_descriptor(&graph());
        assert_eq!(
            lines,
            vec![
                "multigraph khnpp_air_temperature",
                "graph_title Air temperature",
                "graph_category khnpp",
                "graph_vlabel C",
                "graph_scale no",
            ]
        );
    }

    #[test]
    fn test_header_with_total() {
        let mut g = graph();
        g.total = Some("Total".to_string());
        let lines = render_descriptor(&g);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "graph_total Total");
        assert_eq!(lines[5], "graph_scale no");
    }

    #[test]
    fn test_header_empty_total_is_skipped() {
        let mut g = graph();
        g.total = Some(String::new());
        assert_eq!(render_descriptor(&g).len(), 5);
    }

    #[test]
    fn test_fields() {
        let lines = render_fields(&graph(), &palette()).unwrap();
        assert_eq!(
            lines,
            vec![
                "temperature.label Temperature",
                "temperature.colour abcdef",
                "temperature.info Outdoor air temperature",
                "dew.label Dew point",
                "dew.colour red",
                "bare.label Bare",
            ]
        );
    }

    #[test]
    fn test_resolve_colour() {
        let p = palette();
        assert_eq!(resolve_colour(&p, "material.red").unwrap(), "abcdef");
        assert_eq!(resolve_colour(&p, "material.plain").unwrap(), "123456");
        assert_eq!(resolve_colour(&p, "red").unwrap(), "red");
        assert!(resolve_colour(&p, "material.green").is_err());
        assert!(resolve_colour(&p, "flat.red").is_err());
    }

    #[test]
    fn test_missing_colour_aborts() {
        let g = GraphDescriptor::builder("g")
            .field(FieldDescriptor::new("a", "A"))
            .field(FieldDescriptor::new("b", "B").with_colour("flat.green"))
            .build();

        let err = render_fields(&g, &palette()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingColour {
                graph: "g".to_string(),
                field: "b".to_string(),
                group: "flat".to_string(),
                key: "green".to_string(),
            }
        );
        assert!(err.to_string().contains("flat.green"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let g = GraphDescriptor::builder("g")
            .field(FieldDescriptor::new("a", "A"))
            .field(FieldDescriptor::new("a", "B"))
            .build();
        assert!(matches!(
            render_fields(&g, &palette()),
            Err(ConfigError::DuplicateField { .. })
        ));
    }
}
