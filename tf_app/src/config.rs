//! Application configuration
//!
//! Configuration is loaded from these sources, later ones override earlier ones:
//! 1. built in defaults (`app::defaults`)
//! 2. TOML file, `config/default.toml` unless another one is passed on the command line
//! 3. Environment variables (`TFR_SECTION__KEY`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tf_raycaster::{editor::EditorLayout, premade::PaletteTable, render::OpacitySource};

use crate::app::defaults;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Palette the editor starts with
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub volume: VolumeConfig,
    #[serde(default)]
    pub editor: EditorLayout,
    /// Palettes added to the built in ones
    #[serde(default)]
    pub palettes: PaletteTable,
}

fn default_palette() -> String {
    defaults::PALETTE.to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            volume: VolumeConfig::default(),
            editor: EditorLayout::default(),
            palettes: PaletteTable::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, `file` is skipped when `None`
    pub fn load_from(file: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }

        // Environment variables override everything
        // TFR_RENDER__MAX_STEPS=100 -> render.max_steps = 100
        figment = figment.merge(Env::prefixed("TFR_").split("__"));

        figment.extract()
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height of the frame
    pub resolution: [u16; 2],
    pub multi_thread: bool,
    pub early_ray_termination: bool,
    /// Marching steps per ray before the ray is cut
    pub max_steps: usize,
    pub opacity_source: OpacitySource,
    /// Number of samples in the lookup
    pub lookup_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: [defaults::RENDER_WIDTH, defaults::RENDER_HEIGHT],
            multi_thread: defaults::MULTI_THREAD,
            early_ray_termination: defaults::ERT,
            max_steps: defaults::MAX_STEPS,
            opacity_source: OpacitySource::TransferFunction,
            lookup_size: defaults::LOOKUP_SIZE,
        }
    }
}

/// Camera configuration, volume occupies the unit cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: defaults::CAM_POS,
            target: defaults::CAM_TARGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeFormat {
    /// Samples only, dimensions from configuration
    Raw,
    /// TFVOL header followed by samples
    Header,
}

/// Volume configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Volume file, a sphere is generated when not set
    pub path: Option<PathBuf>,
    /// Sample counts, ignored for `Header` files
    pub dims: [usize; 3],
    pub format: VolumeFormat,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            path: None,
            dims: defaults::VOLUME_DIMS,
            format: VolumeFormat::Raw,
        }
    }
}
