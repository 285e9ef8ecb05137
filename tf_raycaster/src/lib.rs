//! Interactive transfer function editing and volume ray marching
//!
//! The editor mutates a [`transfer_function::TransferFunction`], a
//! [`transfer_function::LookupRasterizer`] turns it into a sampled lookup and the
//! [`render::Renderer`] composites a volume through that lookup, one ray per pixel.

pub mod camera;
pub mod color;
pub mod common;
pub mod editor;
pub mod error;
pub mod premade;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use camera::{Camera, PerspectiveCamera};
pub use editor::Editor;
pub use error::{TfError, VolumeError};
pub use transfer_function::{Lookup, LookupRasterizer, TransferFunction};
