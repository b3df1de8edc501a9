//! Graph and field descriptors.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Static definition of one Munin graph and its fields.
///
/// The `id` is printed after `multigraph` in both config and fetch mode, so
/// it must be identical between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// Multigraph identifier.
    pub id: String,

    /// Value of `graph_title`.
    pub title: String,

    /// Value of `graph_category`.
    pub category: String,

    /// Value of `graph_vlabel`.
    pub vlabel: String,

    /// Optional `graph_total` label. `null`, `false` and `""` all mean absent.
    #[serde(default, deserialize_with = "truthy_text", skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,

    /// Value of `graph_scale`.
    pub scale: String,

    /// Fields in output order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl GraphDescriptor {
    /// Create a builder for a descriptor with the given multigraph id.
    pub fn builder(id: impl Into<String>) -> GraphDescriptorBuilder {
        GraphDescriptorBuilder::new(id)
    }

    /// Returns the first field id that occurs more than once, if any.
    pub fn duplicate_field_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .map(|f| f.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

/// Builder for constructing `GraphDescriptor` instances.
#[derive(Debug)]
pub struct GraphDescriptorBuilder {
    descriptor: GraphDescriptor,
}

impl GraphDescriptorBuilder {
    /// Create a new builder. Scale defaults to `no`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            descriptor: GraphDescriptor {
                id: id.into(),
                title: String::new(),
                category: String::new(),
                vlabel: String::new(),
                total: None,
                scale: "no".to_string(),
                fields: Vec::new(),
            },
        }
    }

    /// Set the graph title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.descriptor.title = title.into();
        self
    }

    /// Set the graph category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.descriptor.category = category.into();
        self
    }

    /// Set the vertical axis label.
    pub fn vlabel(mut self, vlabel: impl Into<String>) -> Self {
        self.descriptor.vlabel = vlabel.into();
        self
    }

    /// Set the `graph_total` label.
    pub fn total(mut self, total: impl Into<String>) -> Self {
        self.descriptor.total = Some(total.into());
        self
    }

    /// Set the `graph_scale` value.
    pub fn scale(mut self, scale: impl Into<String>) -> Self {
        self.descriptor.scale = scale.into();
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    /// Build the descriptor.
    pub fn build(self) -> GraphDescriptor {
        self.descriptor
    }
}

/// One metric within a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field identifier, unique within its descriptor.
    pub id: String,

    /// Human readable label.
    pub label: String,

    /// Literal colour or a `palette.key` reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,

    /// Longer description shown by Munin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Key (`"key"`) or dotted path (`"group.key"`) into the runtime data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    /// Line thickness for `LINE<n>` draw styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl FieldDescriptor {
    /// Create a field with a label and nothing else.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            colour: None,
            info: None,
            parameter: None,
            thickness: None,
        }
    }

    /// Set the colour (literal or `palette.key`).
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    /// Set the info text.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the runtime data parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Set the line thickness.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// How this field's value is located in the runtime data.
    pub fn lookup(&self) -> Lookup<'_> {
        match self.parameter.as_deref() {
            Some(parameter) => match parameter.split_once('.') {
                Some((group, key)) => Lookup::Nested { group, key },
                None => Lookup::Key(parameter),
            },
            None => Lookup::Position,
        }
    }
}

/// Location of a field's value inside [`RuntimeData`](crate::RuntimeData).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// `data[group][key]`. Only the first `.` separates group from key.
    Nested { group: &'a str, key: &'a str },
    /// `data[key]`.
    Key(&'a str),
    /// `data[index]` for sequences, otherwise the whole value.
    Position,
}

/// `total` as written in descriptor files: a label, or `false` for none.
#[derive(Deserialize)]
#[serde(untagged)]
enum TotalRepr {
    Text(String),
    Flag(bool),
}

impl TotalRepr {
    fn into_label(self) -> Option<String> {
        match self {
            TotalRepr::Text(text) if !text.is_empty() => Some(text),
            TotalRepr::Text(_) => None,
            // `true` names no label to print.
            TotalRepr::Flag(_) => None,
        }
    }
}

fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TotalRepr>::deserialize(deserializer)?.and_then(TotalRepr::into_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "rnpp_atm",
            "title": "Atmospheric pressure",
            "category": "rnpp",
            "vlabel": "mmHg",
            "total": null,
            "scale": "no",
            "fields": [
                {"id": "pressure", "label": "Pressure", "colour": "material.blue", "parameter": "meteo.p"},
                {"id": "wind", "label": "Wind", "thickness": 2}
            ]
        }"#
    }

    #[test]
    fn test_deserialize_descriptor() {
        let d: GraphDescriptor = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(d.id, "rnpp_atm");
        assert_eq!(d.total, None);
        assert_eq!(d.fields.len(), 2);
        assert_eq!(d.fields[0].colour.as_deref(), Some("material.blue"));
        assert_eq!(d.fields[1].thickness, Some(2.0));
        assert!(d.fields[1].info.is_none());
    }

    #[test]
    fn test_total_truthiness() {
        let parse = |total: &str| {
            let json = format!(
                r#"{{"id":"g","title":"t","category":"c","vlabel":"v","total":{},"scale":"no"}}"#,
                total
            );
            serde_json::from_str::<GraphDescriptor>(&json).unwrap().total
        };
        assert_eq!(parse(r#""Total""#), Some("Total".to_string()));
        assert_eq!(parse(r#""""#), None);
        assert_eq!(parse("false"), None);
        assert_eq!(parse("true"), None);
        assert_eq!(parse("null"), None);
    }

    #[test]
    fn test_missing_total_is_absent() {
        let json = r#"{"id":"g","title":"t","category":"c","vlabel":"v","scale":"no","fields":[]}"#;
        let d: GraphDescriptor = serde_json::from_str(json).unwrap();
        assert!(d.total.is_none());
    }

    #[test]
    fn test_lookup_variants() {
        let nested = FieldDescriptor::new("a", "A").with_parameter("meteo.t");
        assert_eq!(
            nested.lookup(),
            Lookup::Nested {
                group: "meteo",
                key: "t"
            }
        );

        let deep = FieldDescriptor::new("a", "A").with_parameter("x.y.z");
        assert_eq!(
            deep.lookup(),
            Lookup::Nested {
                group: "x",
                key: "y.z"
            }
        );

        let plain = FieldDescriptor::new("a", "A").with_parameter("t");
        assert_eq!(plain.lookup(), Lookup::Key("t"));

        assert_eq!(FieldDescriptor::new("a", "A").lookup(), Lookup::Position);
    }

    #[test]
    fn test_duplicate_field_id() {
        let d = GraphDescriptor::builder("g")
            .field(FieldDescriptor::new("a", "A"))
            .field(FieldDescriptor::new("b", "B"))
            .build();
        assert_eq!(d.duplicate_field_id(), None);

        let d = GraphDescriptor::builder("g")
            .field(FieldDescriptor::new("a", "A"))
            .field(FieldDescriptor::new("a", "A again"))
            .build();
        assert_eq!(d.duplicate_field_id(), Some("a"));
    }

    #[test]
    fn test_builder_defaults() {
        let d = GraphDescriptor::builder("g").build();
        assert_eq!(d.scale, "no");
        assert!(d.total.is_none());
        assert!(d.fields.is_empty());
    }
}
