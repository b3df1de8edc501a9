//! Named colour palettes referenced by field descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Palette name -> (colour key -> colour string).
///
/// Colour strings are hex, with or without a leading `#`. Fields reference an
/// entry as `"palette.key"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorPalette {
    groups: BTreeMap<String, BTreeMap<String, String>>,
}

impl ColorPalette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a colour.
    pub fn insert(
        &mut self,
        group: impl Into<String>,
        key: impl Into<String>,
        colour: impl Into<String>,
    ) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(key.into(), colour.into());
    }

    /// Get a colour by palette name and key.
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }
}

/// A field colour, parsed from its descriptor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourRef<'a> {
    /// `"group.key"`, resolved through a [`ColorPalette`].
    Palette { group: &'a str, key: &'a str },
    /// Anything without a `.`, printed verbatim.
    Literal(&'a str),
}

impl<'a> ColourRef<'a> {
    /// Parse a descriptor colour string.
    pub fn parse(colour: &'a str) -> Self {
        match colour.split_once('.') {
            Some((group, key)) => ColourRef::Palette { group, key },
            None => ColourRef::Literal(colour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_json() {
        let json = r##"{"material": {"red": "#f44336", "blue": "2196f3"}}"##;
        let palette: ColorPalette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.get("material", "red"), Some("#f44336"));
        assert_eq!(palette.get("material", "blue"), Some("2196f3"));
        assert_eq!(palette.get("material", "green"), None);
        assert_eq!(palette.get("flat", "red"), None);
    }

    #[test]
    fn test_colour_ref_parse() {
        assert_eq!(
            ColourRef::parse("material.red"),
            ColourRef::Palette {
                group: "material",
                key: "red"
            }
        );
        assert_eq!(ColourRef::parse("ff0000"), ColourRef::Literal("ff0000"));
    }

    #[test]
    fn test_insert() {
        let mut palette = ColorPalette::new();
        assert_eq!(palette.get("flat", "green"), None);
        palette.insert("flat", "green", "2ecc71");
        palette.insert("flat", "green", "#27ae60");
        assert_eq!(palette.get("flat", "green"), Some("#27ae60"));
    }
}
