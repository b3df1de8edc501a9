//! Graph descriptors and colour palette for every plant.
//!
//! The default set is compiled into the binary. A `data_dir` with the same
//! layout replaces it wholesale:
//!
//! ```text
//! colors.json
//! khnpp/air_temperature.json
//! khnpp/...
//! rnpp/...
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;
use uanpps_adapters::Plant;
use uanpps_munin::ConfigError;
use uanpps_types::{ColorPalette, GraphDescriptor};

macro_rules! embedded {
    ($($plant:literal / $graph:literal),* $(,)?) => {
        &[$(($plant, $graph, include_str!(concat!("../data/", $plant, "/", $graph, ".json")))),*]
    };
}

const EMBEDDED_COLORS: &str = include_str!("../data/colors.json");

const EMBEDDED_DESCRIPTORS: &[(&str, &str, &str)] = embedded![
    "khnpp" / "air_temperature",
    "khnpp" / "humidity",
    "khnpp" / "atm",
    "khnpp" / "rainfall_intensity",
    "khnpp" / "wind_speed",
    "khnpp" / "loads_units",
    "khnpp" / "radiology",
    "rnpp" / "air_temperature",
    "rnpp" / "humidity",
    "rnpp" / "atm",
    "rnpp" / "rainfall_intensity",
    "rnpp" / "wind_speed",
    "rnpp" / "radiology",
    "rnpp" / "production_electricity",
    "sunpp" / "air_temperature",
    "sunpp" / "humidity",
    "sunpp" / "atm",
    "sunpp" / "wind_speed",
    "sunpp" / "loads_units",
    "sunpp" / "radiology",
    "znpp" / "air_temperature",
    "znpp" / "humidity",
    "znpp" / "atm",
    "znpp" / "wind_speed",
    "znpp" / "loads_units",
    "znpp" / "radiology_30km",
];

/// Palette plus the descriptors of one plant, keyed by graph name.
#[derive(Debug, Clone)]
pub struct Catalog {
    plant: Plant,
    palette: ColorPalette,
    descriptors: HashMap<String, GraphDescriptor>,
}

impl Catalog {
    /// Descriptors compiled into the binary.
    pub fn embedded(plant: Plant) -> Result<Self> {
        let palette = parse_palette(EMBEDDED_COLORS, "embedded colors.json")?;
        let mut catalog = Self::empty(plant, palette);

        for (_, graph, json) in EMBEDDED_DESCRIPTORS
            .iter()
            .filter(|(name, _, _)| *name == plant.name())
        {
            let descriptor = parse_descriptor(json, &format!("embedded {}/{}.json", plant, graph))?;
            catalog.insert(graph, descriptor)?;
        }
        Ok(catalog)
    }

    /// Descriptors read from `dir`, one file per graph the plant publishes.
    pub fn load(plant: Plant, dir: &Path) -> Result<Self> {
        let colors = dir.join("colors.json");
        let text = fs::read_to_string(&colors)
            .with_context(|| format!("failed to read {}", colors.display()))?;
        let palette = parse_palette(&text, &colors.display().to_string())?;
        let mut catalog = Self::empty(plant, palette);

        for spec in plant.graphs() {
            let path = dir.join(plant.name()).join(format!("{}.json", spec.name));
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let descriptor = parse_descriptor(&text, &path.display().to_string())?;
            catalog.insert(spec.name, descriptor)?;
        }
        debug!(dir = %dir.display(), graphs = catalog.descriptors.len(), "loaded descriptors");
        Ok(catalog)
    }

    fn empty(plant: Plant, palette: ColorPalette) -> Self {
        Self {
            plant,
            palette,
            descriptors: HashMap::new(),
        }
    }

    fn insert(&mut self, graph: &str, descriptor: GraphDescriptor) -> Result<()> {
        if let Some(field) = descriptor.duplicate_field_id() {
            return Err(ConfigError::DuplicateField {
                graph: descriptor.id.clone(),
                field: field.to_string(),
            }
            .into());
        }
        self.descriptors.insert(graph.to_string(), descriptor);
        Ok(())
    }

    pub fn plant(&self) -> Plant {
        self.plant
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Descriptor for a graph name such as `atm`.
    pub fn descriptor(&self, graph: &str) -> Result<&GraphDescriptor> {
        self.descriptors
            .get(graph)
            .ok_or_else(|| anyhow!("no descriptor for {}/{}", self.plant, graph))
    }

    /// Check that every graph the plant publishes has a descriptor.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<_> = self
            .plant
            .graphs()
            .iter()
            .map(|spec| spec.name)
            .filter(|name| !self.descriptors.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            bail!("{}: missing descriptors for {}", self.plant, missing.join(", "));
        }
        Ok(())
    }
}

fn parse_palette(text: &str, origin: &str) -> Result<ColorPalette> {
    serde_json::from_str(text).with_context(|| format!("invalid palette in {}", origin))
}

fn parse_descriptor(text: &str, origin: &str) -> Result<GraphDescriptor> {
    serde_json::from_str(text).with_context(|| format!("invalid descriptor in {}", origin))
}
