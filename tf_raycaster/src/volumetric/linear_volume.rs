use log::info;
use nalgebra::{vector, Point3, Vector3};

use crate::error::VolumeError;

use super::{
    vol_builder::{BuildVolume, VolumeMetadata},
    Volume,
};

/// Volume with samples stored in one continuous array.
/// Axis `x` grows fastest.
pub struct LinearVolume {
    size: Vector3<usize>,
    data: Vec<f32>,
}

impl std::fmt::Debug for LinearVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("size", &self.size)
            .field("data len ", &self.data.len())
            .finish()
    }
}

impl LinearVolume {
    /// Construct from normalized samples.
    /// `data` must hold exactly `size.x * size.y * size.z` values.
    pub fn from_samples(size: Vector3<usize>, data: Vec<f32>) -> Result<LinearVolume, VolumeError> {
        let expected = sample_count(size)?;
        if data.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(LinearVolume { size, data })
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    fn get_3d_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    // Caller guarantees coordinates are inside
    fn at(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.get_3d_index(x, y, z)]
    }
}

/// Number of samples of a `size` volume, dimensions must be nonzero and the product must fit `usize`
fn sample_count(size: Vector3<usize>) -> Result<usize, VolumeError> {
    let dims = [size.x, size.y, size.z];
    if dims.contains(&0) {
        return Err(VolumeError::ZeroDimension(dims));
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(VolumeError::TooLarge(dims))
}

impl Volume for LinearVolume {
    // Sample centers lie at (i + 0.5) / size
    fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let size_f = self.size.map(|v| v as f32);
        let max = size_f - vector![1.0, 1.0, 1.0];

        let voxel = pos.coords.component_mul(&size_f) - vector![0.5, 0.5, 0.5];
        let voxel = voxel.zip_map(&max, |v, m| if v.is_nan() { 0.0 } else { v.clamp(0.0, m) });

        let base = voxel.map(f32::floor);
        let t = voxel - base;

        let x0 = base.x as usize;
        let y0 = base.y as usize;
        let z0 = base.z as usize;
        let x1 = (x0 + 1).min(self.size.x - 1);
        let y1 = (y0 + 1).min(self.size.y - 1);
        let z1 = (z0 + 1).min(self.size.z - 1);

        // x lines
        let c00 = self.at(x0, y0, z0) * (1.0 - t.x) + self.at(x1, y0, z0) * t.x;
        let c10 = self.at(x0, y1, z0) * (1.0 - t.x) + self.at(x1, y1, z0) * t.x;
        let c01 = self.at(x0, y0, z1) * (1.0 - t.x) + self.at(x1, y0, z1) * t.x;
        let c11 = self.at(x0, y1, z1) * (1.0 - t.x) + self.at(x1, y1, z1) * t.x;

        // y plane
        let c0 = c00 * (1.0 - t.y) + c10 * t.y;
        let c1 = c01 * (1.0 - t.y) + c11 * t.y;

        c0 * (1.0 - t.z) + c1 * t.z
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.get_3d_data(x, y, z)
    }

    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_name(&self) -> &str {
        "LinearVolume"
    }
}

impl BuildVolume for LinearVolume {
    fn build(metadata: VolumeMetadata) -> Result<LinearVolume, VolumeError> {
        let size = metadata.size.ok_or(VolumeError::NoSize)?;
        let samples = metadata.samples()?;

        let expected = sample_count(size)?;
        if samples.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let data: Vec<f32> = samples.iter().map(|&v| v as f32 / 255.0).collect();

        info!("New linear volume, size {size:?}");

        LinearVolume::from_samples(size, data)
    }
}
