//! Per-plant graph lists and the directives printed alongside them.

use uanpps_types::{FieldDescriptor, RuntimeData};

/// Hectopascals to millimetres of mercury.
pub const HPA_TO_MMHG: f64 = 0.7500637554192;

/// Kilo-units to mega-units (kWh published, MWh plotted).
pub const KILO_TO_MEGA: f64 = 0.001;

/// Extra per-field line printed after the rendered field block in config mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDirective {
    /// Nothing.
    None,
    /// `<id>.draw AREA`
    DrawArea,
    /// `<id>.draw LINE<thickness>`, thickness taken from the field (1 if unset).
    DrawLine,
    /// `<id>.min 0`
    MinZero,
}

impl FieldDirective {
    /// Line for one field, if the directive produces one.
    pub fn render(&self, field: &FieldDescriptor) -> Option<String> {
        match self {
            FieldDirective::None => None,
            FieldDirective::DrawArea => Some(format!("{}.draw AREA", field.id)),
            FieldDirective::DrawLine => Some(format!(
                "{}.draw LINE{}",
                field.id,
                field.thickness.unwrap_or(1.0)
            )),
            FieldDirective::MinZero => Some(format!("{}.min 0", field.id)),
        }
    }
}

/// One graph a node publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSpec {
    /// Descriptor name (`data/<plant>/<name>.json`).
    pub name: &'static str,
    /// Arguments for the `graph_args` line.
    pub args: &'static str,
    /// Per-field directive.
    pub directive: FieldDirective,
}

impl GraphSpec {
    const fn new(name: &'static str, args: &'static str, directive: FieldDirective) -> Self {
        Self {
            name,
            args,
            directive,
        }
    }

    /// The `graph_args` line.
    pub fn args_line(&self) -> String {
        format!("graph_args {}", self.args)
    }
}

pub const AIR_TEMPERATURE: GraphSpec = GraphSpec::new(
    "air_temperature",
    "--base 1000 --upper-limit 20 --lower-limit -20 HRULE:0#a1a1a1",
    FieldDirective::None,
);
pub const HUMIDITY: GraphSpec = GraphSpec::new(
    "humidity",
    "--base 1000 --upper-limit 100 --lower-limit 0",
    FieldDirective::None,
);
pub const ATM: GraphSpec = GraphSpec::new("atm", "--base 1000", FieldDirective::DrawArea);
pub const RAINFALL_INTENSITY: GraphSpec = GraphSpec::new(
    "rainfall_intensity",
    "--base 1000 --upper-limit 5 --lower-limit 0",
    FieldDirective::DrawArea,
);
pub const WIND_SPEED: GraphSpec = GraphSpec::new(
    "wind_speed",
    "--base 1000 --upper-limit 20 --lower-limit 0",
    FieldDirective::DrawLine,
);
pub const LOADS_UNITS: GraphSpec = GraphSpec::new(
    "loads_units",
    "--base 1000 --lower-limit 0",
    FieldDirective::MinZero,
);
pub const RADIOLOGY: GraphSpec = GraphSpec::new(
    "radiology",
    "--base 1000 --lower-limit 0 --alt-y-grid",
    FieldDirective::None,
);
pub const RADIOLOGY_30KM: GraphSpec = GraphSpec::new(
    "radiology_30km",
    "--base 1000 --lower-limit 0 --alt-y-grid",
    FieldDirective::None,
);
pub const PRODUCTION_ELECTRICITY: GraphSpec = GraphSpec::new(
    "production_electricity",
    "--base 1000 --lower-limit 0",
    FieldDirective::DrawArea,
);

pub(crate) const KHNPP_GRAPHS: &[GraphSpec] = &[
    AIR_TEMPERATURE,
    HUMIDITY,
    ATM,
    RAINFALL_INTENSITY,
    WIND_SPEED,
    LOADS_UNITS,
    RADIOLOGY,
];

pub(crate) const RNPP_GRAPHS: &[GraphSpec] = &[
    AIR_TEMPERATURE,
    HUMIDITY,
    ATM,
    RAINFALL_INTENSITY,
    WIND_SPEED,
    RADIOLOGY,
    PRODUCTION_ELECTRICITY,
];

pub(crate) const SUNPP_GRAPHS: &[GraphSpec] = &[
    AIR_TEMPERATURE,
    HUMIDITY,
    ATM,
    WIND_SPEED,
    LOADS_UNITS,
    RADIOLOGY,
];

pub(crate) const ZNPP_GRAPHS: &[GraphSpec] = &[
    AIR_TEMPERATURE,
    HUMIDITY,
    ATM,
    WIND_SPEED,
    LOADS_UNITS,
    RADIOLOGY_30KM,
];

/// Runtime data for one graph, produced by a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Descriptor name, matching a [`GraphSpec::name`].
    pub graph: &'static str,
    /// Raw values.
    pub data: RuntimeData,
    /// Unit conversion applied to every field of the graph.
    pub ratio: Option<f64>,
}

impl Reading {
    /// Reading without unit conversion.
    pub fn new(graph: &GraphSpec, data: impl Into<RuntimeData>) -> Self {
        Self {
            graph: graph.name,
            data: data.into(),
            ratio: None,
        }
    }

    /// Multiply every value by `ratio`.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        let field = FieldDescriptor::new("wind", "Wind").with_thickness(2.0);
        assert_eq!(FieldDirective::None.render(&field), None);
        assert_eq!(
            FieldDirective::DrawArea.render(&field).as_deref(),
            Some("wind.draw AREA")
        );
        assert_eq!(
            FieldDirective::DrawLine.render(&field).as_deref(),
            Some("wind.draw LINE2")
        );
        assert_eq!(
            FieldDirective::MinZero.render(&field).as_deref(),
            Some("wind.min 0")
        );

        let thin = FieldDescriptor::new("gust", "Gust");
        assert_eq!(
            FieldDirective::DrawLine.render(&thin).as_deref(),
            Some("gust.draw LINE1")
        );
    }

    #[test]
    fn test_args_line() {
        assert_eq!(ATM.args_line(), "graph_args --base 1000");
    }

    #[test]
    fn test_graph_names_unique_per_plant() {
        for graphs in [KHNPP_GRAPHS, RNPP_GRAPHS, SUNPP_GRAPHS, ZNPP_GRAPHS] {
            let mut names: Vec<_> = graphs.iter().map(|g| g.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), graphs.len());
        }
    }

    #[test]
    fn test_reading_ratio() {
        let r = Reading::new(&ATM, "1013").with_ratio(HPA_TO_MMHG);
        assert_eq!(r.graph, "atm");
        assert_eq!(r.ratio, Some(HPA_TO_MMHG));
        assert_eq!(r.data, RuntimeData::from("1013"));
    }
}
