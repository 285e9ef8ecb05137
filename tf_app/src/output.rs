//! PNG output of frames and lookups

use std::path::Path;

use anyhow::{anyhow, Context};
use image::{ImageFormat, RgbaImage};
use nalgebra::Vector2;
use tf_raycaster::{render::PIXEL_BYTES, Lookup};

use crate::app::defaults::LOOKUP_IMAGE_HEIGHT;

/// Save rendered RGBA frame, first row is the top of the image
pub fn save_frame(path: &Path, rgba: &[u8], resolution: Vector2<u16>) -> anyhow::Result<()> {
    let (width, height) = (resolution.x as u32, resolution.y as u32);
    let expected = width as usize * height as usize * PIXEL_BYTES;
    if rgba.len() != expected {
        return Err(anyhow!(
            "frame has {} bytes, {width}x{height} needs {expected}",
            rgba.len()
        ));
    }

    let image = RgbaImage::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| anyhow!("cannot build {width}x{height} image"))?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("cannot write frame to {path:?}"))
}

/// Save lookup as a strip, one column per sample
pub fn save_lookup(path: &Path, lookup: &Lookup) -> anyhow::Result<()> {
    let row = lookup.to_rgba8();
    let width = lookup.len() as u32;
    let data = row.repeat(LOOKUP_IMAGE_HEIGHT as usize);

    let image = RgbaImage::from_raw(width, LOOKUP_IMAGE_HEIGHT, data)
        .ok_or_else(|| anyhow!("cannot build lookup image"))?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("cannot write lookup to {path:?}"))
}
