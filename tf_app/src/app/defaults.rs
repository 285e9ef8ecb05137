//! # Default values
//!
//! Used when neither configuration file nor environment sets a value.

use tf_raycaster::{render::DEFAULT_MAX_STEPS, transfer_function::DEFAULT_LOOKUP_SIZE};

// Render resolution
pub const RENDER_WIDTH: u16 = 512;
pub const RENDER_HEIGHT: u16 = 512;

pub const MULTI_THREAD: bool = true;
pub const ERT: bool = true;
pub const MAX_STEPS: usize = DEFAULT_MAX_STEPS;
pub const LOOKUP_SIZE: usize = DEFAULT_LOOKUP_SIZE;

pub const PALETTE: &str = "spectrum";

// Generated volume
pub const VOLUME_DIMS: [usize; 3] = [64, 64, 64];

// Camera
pub const CAM_POS: [f32; 3] = [1.8, 1.4, 2.2];
pub const CAM_TARGET: [f32; 3] = [0.5, 0.5, 0.5];

/// Rows of the exported lookup image
pub const LOOKUP_IMAGE_HEIGHT: u32 = 16;
