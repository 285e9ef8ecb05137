use serde::{Deserialize, Serialize};

use crate::{error::TfError, transfer_function::TransferFunction};

/// Named list of colors, equally spaced when turned into a transfer function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<String>,
}

impl Palette {
    pub fn new<S: Into<String>>(name: &str, colors: impl IntoIterator<Item = S>) -> Palette {
        Palette {
            name: name.to_owned(),
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn transfer_function(&self) -> Result<TransferFunction, TfError> {
        TransferFunction::from_colors(self.colors.as_slice())
    }
}

/// Table of preset palettes.
///
/// Supplied as configuration data, so palettes can be added without touching code.
/// Deserializes from a plain list of palettes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl PaletteTable {
    pub fn new(palettes: Vec<Palette>) -> PaletteTable {
        PaletteTable { palettes }
    }

    /// Palettes available without configuration
    pub fn builtin() -> PaletteTable {
        PaletteTable::new(vec![
            Palette::new(
                "inferno",
                ["#00000400", "#57106e40", "#bc375480", "#f98e09c0", "#fcffa4ff"],
            ),
            Palette::new(
                "spectrum",
                ["#000000", "#FF0000", "#00FF00", "#0000FF", "#000000"],
            ),
            Palette::new("grayscale", ["#00000000", "#ffffffff"]),
            Palette::new(
                "bone",
                [
                    "rgba(0, 0, 0, 0)",
                    "rgba(0, 0, 0, 0)",
                    "rgba(227, 218, 201, 0.6)",
                    "rgba(255, 255, 255, 1)",
                ],
            ),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Add palette, replacing a palette of the same name
    pub fn insert(&mut self, palette: Palette) {
        match self.palettes.iter_mut().find(|p| p.name == palette.name) {
            Some(existing) => *existing = palette,
            None => self.palettes.push(palette),
        }
    }

    /// Add all palettes of `other`, overriding same named ones
    pub fn merge(&mut self, other: PaletteTable) {
        for palette in other.palettes {
            self.insert(palette);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Transfer function built from palette `name`
    pub fn transfer_function(&self, name: &str) -> Result<TransferFunction, TfError> {
        self.get(name)
            .ok_or_else(|| TfError::UnknownPalette(name.to_owned()))?
            .transfer_function()
    }
}
