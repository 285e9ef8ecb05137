// Preset palettes.
// Applications usually extend the table from their configuration.

mod palettes;

pub use palettes::{Palette, PaletteTable};
