//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use nalgebra::{vector, Vector3};

use crate::{
    color,
    transfer_function::{ColorStop, TransferFunction},
    volumetric::{BuildVolume, DataSource, LinearVolume, Volume, VolumeMetadata},
};

pub fn vol_meta(size: Vector3<usize>, data: Vec<u8>) -> VolumeMetadata {
    VolumeMetadata {
        size: Some(size),
        data: Some(DataSource::from_vec(data)),
        data_offset: 0,
    }
}

fn build<V>(size: Vector3<usize>, data: Vec<u8>) -> V
where
    V: Volume + BuildVolume,
{
    BuildVolume::build(vol_meta(size, data)).unwrap()
}

/// Every sample equal to `value`
pub fn uniform_volume<V>(size: Vector3<usize>, value: u8) -> V
where
    V: Volume + BuildVolume,
{
    build(size, vec![value; size.x * size.y * size.z])
}

/// Samples grow along `x` from 0 to 255
pub fn ramp_volume<V>(size: Vector3<usize>) -> V
where
    V: Volume + BuildVolume,
{
    let last = (size.x.max(2) - 1) as f32;
    let mut data = Vec::with_capacity(size.x * size.y * size.z);
    for _z in 0..size.z {
        for _y in 0..size.y {
            for x in 0..size.x {
                data.push((x as f32 / last * 255.0).round() as u8);
            }
        }
    }
    build(size, data)
}

/// Ball of `255` in the middle of the volume, `0` elsewhere
pub fn sphere_volume<V>(side: usize) -> V
where
    V: Volume + BuildVolume,
{
    let half = side as f32 / 2.0;
    let radius = side as f32 * 0.35;
    let mut data = Vec::with_capacity(side * side * side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let p = vector![x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5];
                let d = (p - vector![half, half, half]).norm();
                data.push(if d <= radius { 255 } else { 0 });
            }
        }
    }
    build(vector![side, side, side], data)
}

/// Red with opacity rising from 0 to 0.5 at 0.5, constant above
pub fn ramp_step_tf() -> TransferFunction {
    TransferFunction::new(vec![
        ColorStop::new(0.0, color::zero()),
        ColorStop::new(0.5, color::new(1.0, 0.0, 0.0, 0.5)),
        ColorStop::new(1.0, color::new(1.0, 0.0, 0.0, 0.5)),
    ])
    .unwrap()
}

/// Transparent below 0.5, opaque red from 0.5 up (two stops tied at 0.5)
pub fn step_tf() -> TransferFunction {
    TransferFunction::new(vec![
        ColorStop::new(0.0, color::zero()),
        ColorStop::new(0.5, color::zero()),
        ColorStop::new(0.5, color::new(1.0, 0.0, 0.0, 1.0)),
        ColorStop::new(1.0, color::new(1.0, 0.0, 0.0, 1.0)),
    ])
    .unwrap()
}

/// Every sample exactly `value`, built from normalized samples
pub fn constant_field(size: Vector3<usize>, value: f32) -> LinearVolume {
    LinearVolume::from_samples(size, vec![value; size.x * size.y * size.z]).unwrap()
}

/// All stops have zero opacity
pub fn transparent_tf() -> TransferFunction {
    TransferFunction::from_colors(&["#ff000000", "#00ff0000", "#0000ff00"]).unwrap()
}

/// Black to white, opacity follows the value
pub fn white_tf() -> TransferFunction {
    TransferFunction::from_colors(&["#00000000", "#ffffffff"]).unwrap()
}

/// The five color gradient used in editor sessions
pub fn spectrum_tf() -> TransferFunction {
    TransferFunction::from_colors(&["#000000", "#FF0000", "#00FF00", "#0000FF", "#000000"]).unwrap()
}
